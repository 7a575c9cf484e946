use clap::{Parser, Subcommand};
use std::sync::Arc;

use card_utility_bot::application::errors::{BotError, ConfigError};
use card_utility_bot::application::messaging::{InboundAdapter, MessageParser};
use card_utility_bot::application::services::CommandRouter;
use card_utility_bot::domain::traits::Bot;
use card_utility_bot::infrastructure::adapters::console::{self, ConsoleAdapter};
use card_utility_bot::infrastructure::adapters::telegram::{polling, TelegramAdapter};
use card_utility_bot::infrastructure::binlist::BinlistClient;
use card_utility_bot::infrastructure::config::Config;
use card_utility_bot::infrastructure::webhook::{self, WebhookState};

#[derive(Parser)]
#[command(name = "card-utility-bot")]
#[command(about = "Credit card utility bot: Luhn checks, synthetic numbers and BIN lookups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Long-poll Telegram for updates (console mode without a token)
    Run,
    /// Serve the webhook endpoint and register it with Telegram
    Serve,
    /// Show version
    Version,
    /// Print the default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Run => with_runtime(run_bot(cli.config, cli.token)),
        Commands::Serve => with_runtime(serve_webhook(cli.config, cli.token)),
        Commands::Version => {
            println!("card-utility-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn with_runtime<F>(future: F) -> Result<(), BotError>
where
    F: std::future::Future<Output = Result<(), BotError>>,
{
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(future)
}

/// File config (when present) with environment and CLI overrides on top
fn load_config(config_path: &str, token_override: Option<String>) -> Result<Config, ConfigError> {
    let mut config = if std::path::Path::new(config_path).exists() {
        let mut config = Config::load(config_path)?;
        config.apply_env()?;
        config
    } else {
        Config::load_env()?
    };

    if let Some(token) = token_override {
        config.bot.token = token;
    }

    Ok(config)
}

fn build_router(config: &Config, owner_id: Option<i64>) -> Result<CommandRouter, BotError> {
    if owner_id.is_none() {
        tracing::warn!("No owner id configured, owner-only commands are disabled");
    }
    let lookup = BinlistClient::new(&config.bin_lookup.base_url, config.bin_lookup_timeout())?;
    Ok(CommandRouter::builtin(owner_id, &config.owner.name, Arc::new(lookup)))
}

async fn run_bot(config_path: String, token_override: Option<String>) -> Result<(), BotError> {
    let config = Arc::new(load_config(&config_path, token_override)?);
    tracing::info!("Starting {}", config.bot.name);

    let inbound = InboundAdapter::new(MessageParser::new(&config.bot.prefix));

    if config.has_placeholder_token() {
        tracing::warn!("No bot token configured, running in console mode");
        // The local operator is the owner
        let sender_id = config.owner.id.unwrap_or(console::CONSOLE_SENDER_ID);
        let router = Arc::new(build_router(&config, Some(sender_id))?);
        return console::run_console(ConsoleAdapter::new(), router, inbound, sender_id).await;
    }

    let router = Arc::new(build_router(&config, config.owner.id)?);

    let mut bot = TelegramAdapter::new(&config.bot.token);
    bot.fetch_bot_info().await?;
    bot.start().await?;
    let info = bot.bot_info();
    tracing::info!("Bot started: {} (@{}, id {})", info.name, info.username, info.id);

    if let Err(e) = bot.delete_webhook().await {
        tracing::warn!("Failed to delete webhook: {}", e);
    }
    if let Err(e) = bot.register_commands(router.commands()).await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    polling::run_polling(Arc::new(bot), router, Arc::new(inbound)).await
}

async fn serve_webhook(config_path: String, token_override: Option<String>) -> Result<(), BotError> {
    let config = Arc::new(load_config(&config_path, token_override)?);
    tracing::info!("Starting {} in webhook mode", config.bot.name);

    let router = Arc::new(build_router(&config, config.owner.id)?);
    let bot = TelegramAdapter::new(&config.bot.token);

    if config.has_placeholder_token() {
        tracing::warn!("No bot token configured, replies will not be delivered");
    } else {
        bot.start().await?;
        if config.webhook.secret_token.is_none() {
            tracing::warn!("No webhook secret configured, /webhook accepts unsigned updates");
        }
        let secret = config.webhook.secret_token.as_deref();
        if let Err(e) = bot.set_webhook(&config.webhook_endpoint(), secret).await {
            tracing::warn!("Failed to register webhook: {}", e);
        }
        if let Err(e) = bot.register_commands(router.commands()).await {
            tracing::warn!("Failed to register commands: {}", e);
        }
    }

    let state = WebhookState {
        router,
        inbound: Arc::new(InboundAdapter::new(MessageParser::new(&config.bot.prefix))),
        bot: Arc::new(bot),
        secret_token: config.webhook.secret_token.clone(),
    };

    webhook::serve(state, config.webhook.port).await
}

fn init_config() -> Result<(), BotError> {
    let yaml = serde_yaml::to_string(&Config::default())
        .map_err(|e| BotError::Parse(e.to_string()))?;
    println!("{}", yaml);
    println!("\nSave this to config.yaml and adjust as needed.");
    Ok(())
}

//! Console adapter for development/testing

use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::application::errors::BotError;
use crate::application::messaging::{Inbound, InboundAdapter};
use crate::application::services::{respond, CommandRouter};
use crate::domain::entities::TextFormat;
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};

/// Chat id used for every console message
pub const CONSOLE_CHAT_ID: i64 = 0;

/// Sender id for console input when no owner id is configured
pub const CONSOLE_SENDER_ID: i64 = 1;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "card-utility-bot".to_string(),
                username: "console".to_string(),
            },
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_message(&self, _chat_id: i64, text: &str, _format: TextFormat) -> Result<i64, BotError> {
        println!("[BOT] {}", text);
        Ok(0)
    }

    async fn send_with_keyboard(
        &self,
        _chat_id: i64,
        text: &str,
        _format: TextFormat,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<i64, BotError> {
        println!("[BOT] {}", text);
        for row in buttons {
            let row_text: Vec<String> = row
                .iter()
                .map(|b| match &b.callback_data {
                    Some(data) => format!("{} (/{})", b.text, data),
                    None => b.text.clone(),
                })
                .collect();
            println!("  [Buttons] {}", row_text.join(" | "));
        }
        Ok(0)
    }

    async fn answer_callback(&self, _callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

/// Read commands from stdin until EOF or Ctrl-C.
///
/// Every line is routed as if `sender_id` had sent it.
pub async fn run_console(
    bot: ConsoleAdapter,
    router: Arc<CommandRouter>,
    inbound: InboundAdapter,
    sender_id: i64,
) -> Result<(), BotError> {
    bot.start().await?;

    let info = bot.bot_info();
    tracing::info!("Bot started: {} (@{}, id {})", info.name, info.username, info.id);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            return Ok(());
        };

        let Some((command, args)) = inbound.parser().parse_command(&line) else {
            continue;
        };

        let event = match inbound.normalize(Inbound::Structured {
            sender_id,
            sender_name: Some("console".to_string()),
            chat_id: CONSOLE_CHAT_ID,
            command,
            args,
        }) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Ignoring input: {}", e);
                continue;
            }
        };

        respond(&bot, &router, &event).await;
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use crate::application::errors::ConfigError;

/// Token used when none is configured; never valid against Telegram
pub const PLACEHOLDER_TOKEN: &str = "YOUR_BOT_TOKEN";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub owner: OwnerConfig,
    pub webhook: WebhookConfig,
    pub bin_lookup: BinLookupConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
    pub token: String,
}

/// The single identity allowed to run owner-only commands. Without an
/// `id` nobody is.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OwnerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebhookConfig {
    pub port: u16,
    pub public_url: String,
    /// Sent by Telegram in `X-Telegram-Bot-Api-Secret-Token` on every update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BinLookupConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "card-utility-bot".to_string(),
                prefix: "/".to_string(),
                token: PLACEHOLDER_TOKEN.to_string(),
            },
            owner: OwnerConfig {
                id: None,
                name: "OwnerName".to_string(),
            },
            webhook: WebhookConfig {
                port: 5000,
                public_url: "https://example.com".to_string(),
                secret_token: None,
            },
            bin_lookup: BinLookupConfig {
                base_url: "https://lookup.binlist.net/".to_string(),
                timeout_seconds: 5,
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Defaults with environment overrides applied
    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `BOT_TOKEN`, `OWNER_ID`, `OWNER_NAME`, `PORT`,
    /// `WEBHOOK_URL`, `WEBHOOK_SECRET` and `BINLIST_URL` when they are set
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(token) = var("BOT_TOKEN") {
            self.bot.token = token;
        }
        if let Some(id) = var("OWNER_ID") {
            self.owner.id = Some(parse_var("OWNER_ID", &id)?);
        }
        if let Some(name) = var("OWNER_NAME") {
            self.owner.name = name;
        }
        if let Some(port) = var("PORT") {
            self.webhook.port = parse_var("PORT", &port)?;
        }
        if let Some(url) = var("WEBHOOK_URL") {
            self.webhook.public_url = url;
        }
        if let Some(secret) = var("WEBHOOK_SECRET").filter(|s| !s.trim().is_empty()) {
            self.webhook.secret_token = Some(secret);
        }
        if let Some(url) = var("BINLIST_URL") {
            self.bin_lookup.base_url = url;
        }
        Ok(())
    }

    /// True when the token is still the placeholder (or blank)
    pub fn has_placeholder_token(&self) -> bool {
        let token = self.bot.token.trim();
        token.is_empty() || token == PLACEHOLDER_TOKEN
    }

    pub fn bin_lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.bin_lookup.timeout_seconds)
    }

    /// Full URL Telegram should POST updates to
    pub fn webhook_endpoint(&self) -> String {
        format!("{}/webhook", self.webhook.public_url.trim_end_matches('/'))
    }
}

fn parse_var<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

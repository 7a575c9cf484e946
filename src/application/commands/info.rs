//! Informational commands: start, help, inline, status, credits

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{escape_markdown, replies, Access, CommandHandler};
use crate::application::errors::CommandError;
use crate::domain::entities::{CommandRequest, CommandResult};
use crate::domain::traits::KeyboardButton;

pub struct StartCommand;

#[async_trait]
impl CommandHandler for StartCommand {
    fn description(&self) -> &str {
        "Start the bot"
    }

    async fn handle(&self, request: &CommandRequest) -> Result<CommandResult, CommandError> {
        let name = request.sender_name.as_deref().unwrap_or("there");
        Ok(CommandResult::plain(format!(
            "👋 Hello {}! Welcome to the Credit Card Utility Bot.\n\n\
             ✨ Use /help to see available commands and explore our features! 🎉",
            name
        )))
    }
}

pub struct HelpCommand;

#[async_trait]
impl CommandHandler for HelpCommand {
    fn description(&self) -> &str {
        "Show available commands"
    }

    async fn handle(&self, _request: &CommandRequest) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::plain(replies::HELP))
    }
}

pub struct InlineCommand;

#[async_trait]
impl CommandHandler for InlineCommand {
    fn description(&self) -> &str {
        "Interactive buttons"
    }

    async fn handle(&self, _request: &CommandRequest) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::plain(replies::INLINE_PROMPT).with_keyboard(vec![
            vec![KeyboardButton::new("Generate Card 🎟️").with_callback("generate")],
            vec![KeyboardButton::new("BIN Lookup 🔍").with_callback("bin")],
            vec![KeyboardButton::new("Check Card ✅").with_callback("check")],
        ]))
    }
}

pub struct StatusCommand {
    started_at: DateTime<Utc>,
}

impl StatusCommand {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }
}

#[async_trait]
impl CommandHandler for StatusCommand {
    fn description(&self) -> &str {
        "Get bot status (owner only)"
    }

    fn access(&self) -> Access {
        Access::OwnerOnly
    }

    async fn handle(&self, _request: &CommandRequest) -> Result<CommandResult, CommandError> {
        let uptime = (Utc::now() - self.started_at).num_seconds().max(0);
        Ok(CommandResult::plain(format!(
            "🟢 The bot is currently running smoothly!\n\nVersion: {}\nUptime: {}",
            env!("CARGO_PKG_VERSION"),
            format_uptime(uptime)
        )))
    }
}

fn format_uptime(seconds: i64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else {
        format!("{}m {}s", minutes, secs)
    }
}

pub struct CreditsCommand {
    owner_name: String,
}

impl CreditsCommand {
    pub fn new(owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: owner_name.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for CreditsCommand {
    fn description(&self) -> &str {
        "View credits (owner only)"
    }

    fn access(&self) -> Access {
        Access::OwnerOnly
    }

    async fn handle(&self, _request: &CommandRequest) -> Result<CommandResult, CommandError> {
        Ok(CommandResult::rich(format!(
            "🌟 *Credits:*\n\
             This bot was created with ❤️ by @{}.\n\
             Special thanks to the libraries and APIs used! 🙌",
            escape_markdown(&self.owner_name)
        )))
    }
}

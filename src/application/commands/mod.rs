//! Command handlers - One type per registered command

pub mod card;
pub mod info;
pub mod replies;

use async_trait::async_trait;

use crate::application::errors::CommandError;
use crate::domain::entities::{CommandRequest, CommandResult};

pub use card::{BinCommand, CheckCommand, GenerateCommand};
pub use info::{CreditsCommand, HelpCommand, InlineCommand, StartCommand, StatusCommand};

/// Who may run a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    OwnerOnly,
}

/// A single command capability
///
/// The router checks `access` and `missing_argument` before calling
/// `handle`, so handlers can assume both preconditions hold.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// One-line description shown in the Telegram command menu
    fn description(&self) -> &str;

    fn access(&self) -> Access {
        Access::Public
    }

    /// Reply for an invocation without arguments. `Some` marks the
    /// argument as required.
    fn missing_argument(&self) -> Option<&str> {
        None
    }

    async fn handle(&self, request: &CommandRequest) -> Result<CommandResult, CommandError>;
}

/// Escape the characters legacy Telegram Markdown treats as entity markers
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::application::commands::{
    replies, Access, BinCommand, CheckCommand, CommandHandler, CreditsCommand, GenerateCommand,
    HelpCommand, InlineCommand, StartCommand, StatusCommand,
};
use crate::application::errors::CommandError;
use crate::domain::entities::{CommandRequest, CommandResult};
use crate::domain::traits::BinLookup;

/// Resolves command tokens to handlers and enforces access rules
pub struct CommandRouter {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    order: Vec<String>,
    owner_id: Option<i64>,
}

impl CommandRouter {
    /// Router with no handlers. Owner-only commands are denied to everyone
    /// when `owner_id` is `None`.
    pub fn new(owner_id: Option<i64>) -> Self {
        Self {
            handlers: HashMap::new(),
            order: Vec::new(),
            owner_id,
        }
    }

    /// Router with every built-in command registered
    pub fn builtin(owner_id: Option<i64>, owner_name: &str, lookup: Arc<dyn BinLookup>) -> Self {
        let mut router = Self::new(owner_id);
        router.register("start", StartCommand);
        router.register("help", HelpCommand);
        router.register("generate", GenerateCommand);
        router.register("bin", BinCommand::new(lookup));
        router.register("check", CheckCommand);
        router.register("inline", InlineCommand);
        router.register("status", StatusCommand::new(Utc::now()));
        router.register("credits", CreditsCommand::new(owner_name));
        router
    }

    pub fn register<H: CommandHandler + 'static>(&mut self, name: &str, handler: H) {
        let name = name.to_lowercase();
        if self.handlers.insert(name.clone(), Arc::new(handler)).is_none() {
            self.order.push(name);
        }
    }

    /// `(name, description)` pairs in registration order
    pub fn commands(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order
            .iter()
            .filter_map(|name| self.handlers.get(name).map(|h| (name.as_str(), h.description())))
    }

    /// Route a request to its handler. Never fails: every error becomes a
    /// user-facing reply.
    pub async fn dispatch(&self, request: &CommandRequest) -> CommandResult {
        match self.route(request).await {
            Ok(result) => {
                tracing::info!("[{}] /{} handled", request.chat_id, request.command);
                result
            }
            Err(e) => {
                match &e {
                    CommandError::UpstreamLookupFailed(_) => {
                        tracing::warn!("[{}] /{} failed: {}", request.chat_id, request.command, e)
                    }
                    CommandError::Unauthorized(_) => tracing::warn!(
                        "[{}] sender {} denied: {}",
                        request.chat_id,
                        request.sender_id,
                        e
                    ),
                    _ => tracing::info!("[{}] {}", request.chat_id, e),
                }
                error_reply(&e)
            }
        }
    }

    async fn route(&self, request: &CommandRequest) -> Result<CommandResult, CommandError> {
        let handler = self
            .handlers
            .get(&request.command)
            .ok_or_else(|| CommandError::UnknownCommand(request.command.clone()))?;

        if handler.access() == Access::OwnerOnly && !self.is_owner(request.sender_id) {
            return Err(CommandError::Unauthorized(request.command.clone()));
        }

        if let Some(prompt) = handler.missing_argument() {
            if request.joined_args().is_empty() {
                return Err(CommandError::MissingArgument(prompt.to_string()));
            }
        }

        handler.handle(request).await
    }

    fn is_owner(&self, sender_id: i64) -> bool {
        self.owner_id == Some(sender_id)
    }
}

fn error_reply(error: &CommandError) -> CommandResult {
    let text = match error {
        CommandError::UnknownCommand(_) => replies::UNKNOWN_COMMAND,
        CommandError::Unauthorized(_) => replies::UNAUTHORIZED,
        CommandError::MissingArgument(prompt) => prompt.as_str(),
        // Payload errors are raised before routing; handlers only see parsed input
        CommandError::InvalidFormat(_) | CommandError::MalformedPayload(_) => replies::INVALID_FORMAT,
        CommandError::UpstreamLookupFailed(_) => replies::LOOKUP_FAILED,
    };
    CommandResult::plain(text)
}

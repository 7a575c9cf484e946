use async_trait::async_trait;
use crate::domain::entities::{CommandResult, TextFormat};
use crate::application::errors::BotError;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Prepare the adapter before the first message is delivered
    async fn start(&self) -> Result<(), BotError>;

    /// Send a message to a chat, returning the platform message id
    async fn send_message(&self, chat_id: i64, text: &str, format: TextFormat) -> Result<i64, BotError>;

    /// Send a message with inline keyboard
    async fn send_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<i64, BotError>;

    /// Answer a callback query
    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;

    /// Deliver a routed result, attaching its keyboard when it has one
    async fn deliver(&self, chat_id: i64, result: &CommandResult) -> Result<i64, BotError> {
        match &result.keyboard {
            Some(rows) => {
                self.send_with_keyboard(chat_id, &result.text, result.format, rows.clone())
                    .await
            }
            None => self.send_message(chat_id, &result.text, result.format).await,
        }
    }
}

/// Keyboard button for inline keyboards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub callback_data: Option<String>,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
        }
    }

    pub fn with_callback(mut self, data: impl Into<String>) -> Self {
        self.callback_data = Some(data.into());
        self
    }
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}

//! Telegram adapter

pub mod polling;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::entities::TextFormat;
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};
use crate::application::errors::BotError;
use crate::application::messaging::{Inbound, MessageParser};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

impl Update {
    /// Convert a polled update into an inbound event.
    ///
    /// Only text starting with a command marker and callback queries carrying
    /// data are routed; anything else yields `None`.
    pub fn into_inbound(self, parser: &MessageParser) -> Option<Inbound> {
        if let Some(cb) = self.callback_query {
            let chat_id = cb.message.as_ref()?.chat.id;
            return Some(Inbound::Callback {
                callback_id: cb.id,
                sender_id: cb.from.id,
                sender_name: cb.from.first_name,
                chat_id,
                data: cb.data?,
            });
        }

        let msg = self.message?;
        let text = msg.text?;
        let text = text.trim();
        if !(text.starts_with('/') || text.starts_with(parser.prefix())) {
            return None;
        }

        let (command, args) = parser.parse_command(text)?;
        let (sender_id, sender_name) = msg
            .from
            .map(|u| (u.id, u.first_name))
            .unwrap_or((0, None));

        Some(Inbound::Structured {
            sender_id,
            sender_name,
            chat_id: msg.chat.id,
            command,
            args,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T, BotError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(BotError::Network(format!(
                "{} failed: {}",
                method,
                self.description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageResult {
    message_id: i64,
}

#[derive(Serialize)]
struct InlineKeyboardButton {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
}

#[derive(Serialize)]
struct InlineKeyboardMarkup {
    inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    token: String,
    api_base: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base: API_BASE.to_string(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: "card-utility-bot".to_string(),
                username: "card_utility_bot".to_string(),
            },
        }
    }

    /// Point the adapter at a different Bot API server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, BotError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        let data: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| BotError::Parse(format!("{} ({}): {}", method, status, e)))?;

        data.into_result(method)
    }

    /// Fetch bot info from Telegram API
    pub async fn fetch_bot_info(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct BotInfoResponse {
            id: i64,
            first_name: String,
            username: Option<String>,
        }

        let me: BotInfoResponse = self.call("getMe", &serde_json::json!({})).await?;
        self.info = BotInfo {
            id: me.id.to_string(),
            username: me.username.unwrap_or_else(|| me.first_name.clone()),
            name: me.first_name,
        };

        Ok(())
    }

    /// Get updates from Telegram using getUpdates API
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<&'static str>,
        }

        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message", "callback_query"],
        };

        self.call("getUpdates", &request).await
    }

    /// Get the next update offset
    pub fn get_next_offset(updates: &[Update], current: i64) -> i64 {
        updates.iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
    }

    async fn post_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<&str>,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<i64, BotError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
            reply_markup: keyboard,
        };
        let result: MessageResult = self.call("sendMessage", &request).await?;
        Ok(result.message_id)
    }

    /// Send with the requested format, falling back to plain text when
    /// Telegram rejects the markup
    async fn send_formatted(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<i64, BotError> {
        match format.parse_mode() {
            Some(mode) => match self.post_message(chat_id, text, Some(mode), keyboard).await {
                Ok(id) => Ok(id),
                Err(e) => {
                    tracing::warn!("{} failed, using plain text: {}", mode, e);
                    self.post_message(chat_id, text, None, keyboard).await
                }
            },
            None => self.post_message(chat_id, text, None, keyboard).await,
        }
    }

    /// Register bot commands with Telegram
    pub async fn register_commands<'a>(
        &self,
        commands: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct Command<'a> {
            command: &'a str,
            description: &'a str,
        }

        #[derive(Serialize)]
        struct SetMyCommandsRequest<'a> {
            commands: Vec<Command<'a>>,
        }

        let request = SetMyCommandsRequest {
            commands: commands
                .into_iter()
                .map(|(command, description)| Command { command, description })
                .collect(),
        };

        let _: bool = self.call("setMyCommands", &request).await?;
        tracing::info!("Registered bot commands with Telegram");
        Ok(())
    }

    /// Ask Telegram to POST updates to `url`, signed with `secret_token`
    /// when one is given
    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct SetWebhookRequest<'a> {
            url: &'a str,
            allowed_updates: [&'static str; 2],
            #[serde(skip_serializing_if = "Option::is_none")]
            secret_token: Option<&'a str>,
        }

        let request = SetWebhookRequest {
            url,
            allowed_updates: ["message", "callback_query"],
            secret_token,
        };
        let _: bool = self.call("setWebhook", &request).await?;
        tracing::info!("Webhook registered at {}", url);
        Ok(())
    }

    /// Remove any webhook so getUpdates can be used
    pub async fn delete_webhook(&self) -> Result<(), BotError> {
        let _: bool = self.call("deleteWebhook", &serde_json::json!({})).await?;
        Ok(())
    }
}

#[async_trait]
impl Bot for TelegramAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting Telegram bot (token: {}...)", &self.token[..8.min(self.token.len())]);
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str, format: TextFormat) -> Result<i64, BotError> {
        tracing::debug!("Sending to {}: {}", chat_id, text);
        self.send_formatted(chat_id, text, format, None).await
    }

    async fn send_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<i64, BotError> {
        tracing::debug!("Sending with keyboard to {}: {}", chat_id, text);

        let markup = InlineKeyboardMarkup {
            inline_keyboard: buttons
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|btn| InlineKeyboardButton {
                            text: btn.text,
                            callback_data: btn.callback_data,
                        })
                        .collect()
                })
                .collect(),
        };

        self.send_formatted(chat_id, text, format, Some(&markup)).await
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct AnswerRequest<'a> {
            callback_query_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            text: Option<&'a str>,
        }

        let request = AnswerRequest {
            callback_query_id: callback_id,
            text,
        };
        let _: bool = self.call("answerCallbackQuery", &request).await?;
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

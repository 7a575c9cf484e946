//! Inbound adapter - Normalizes every transport shape into a `CommandRequest`

use serde_json::Value;

use super::parser::MessageParser;
use crate::application::errors::CommandError;
use crate::domain::entities::CommandRequest;

/// Raw inbound event, tagged by the shape it arrived in
#[derive(Debug, Clone)]
pub enum Inbound {
    /// Transport already split the command name and argument tokens
    Structured {
        sender_id: i64,
        sender_name: Option<String>,
        chat_id: i64,
        command: String,
        args: Vec<String>,
    },
    /// Raw webhook body
    Webhook(Value),
    /// Inline keyboard button press
    Callback {
        callback_id: String,
        sender_id: i64,
        sender_name: Option<String>,
        chat_id: i64,
        data: String,
    },
}

/// A normalized request plus the transport details needed to reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub request: CommandRequest,
    /// Set when the event was a callback query that must be acknowledged
    pub callback_id: Option<String>,
}

impl InboundEvent {
    fn message(request: CommandRequest) -> Self {
        Self { request, callback_id: None }
    }
}

/// Turns `Inbound` values into `InboundEvent`s
#[derive(Debug, Clone, Default)]
pub struct InboundAdapter {
    parser: MessageParser,
}

impl InboundAdapter {
    pub fn new(parser: MessageParser) -> Self {
        Self { parser }
    }

    pub fn parser(&self) -> &MessageParser {
        &self.parser
    }

    pub fn normalize(&self, inbound: Inbound) -> Result<InboundEvent, CommandError> {
        match inbound {
            Inbound::Structured { sender_id, sender_name, chat_id, command, args } => {
                let command = self.parser.normalize_command(&command);
                Ok(InboundEvent::message(
                    CommandRequest::new(sender_id, chat_id, command, args).with_sender_name(sender_name),
                ))
            }
            Inbound::Callback { callback_id, sender_id, sender_name, chat_id, data } => {
                let (command, args) = self
                    .parser
                    .parse_command(&data)
                    .ok_or_else(|| CommandError::MalformedPayload("empty callback data".to_string()))?;
                Ok(InboundEvent {
                    request: CommandRequest::new(sender_id, chat_id, command, args).with_sender_name(sender_name),
                    callback_id: Some(callback_id),
                })
            }
            Inbound::Webhook(payload) => self.normalize_webhook(&payload),
        }
    }

    fn normalize_webhook(&self, payload: &Value) -> Result<InboundEvent, CommandError> {
        if let Some(query) = payload.get("callback_query") {
            return self.normalize(callback_from_json(query)?);
        }

        let message = payload
            .get("message")
            .ok_or_else(|| CommandError::MalformedPayload("no message object".to_string()))?;

        let chat_id = message
            .pointer("/chat/id")
            .and_then(Value::as_i64)
            .ok_or_else(|| CommandError::MalformedPayload("chat id missing".to_string()))?;

        let text = message
            .get("text")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CommandError::MalformedPayload("text missing".to_string()))?;

        let (command, args) = self
            .parser
            .parse_command(text)
            .ok_or_else(|| CommandError::MalformedPayload("text missing".to_string()))?;

        let (sender_id, sender_name) = sender_from_json(message.get("from"));

        Ok(InboundEvent::message(
            CommandRequest::new(sender_id, chat_id, command, args).with_sender_name(sender_name),
        ))
    }
}

fn callback_from_json(query: &Value) -> Result<Inbound, CommandError> {
    let callback_id = query
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| CommandError::MalformedPayload("callback id missing".to_string()))?;
    let chat_id = query
        .pointer("/message/chat/id")
        .and_then(Value::as_i64)
        .ok_or_else(|| CommandError::MalformedPayload("chat id missing".to_string()))?;
    let data = query
        .get("data")
        .and_then(Value::as_str)
        .ok_or_else(|| CommandError::MalformedPayload("callback data missing".to_string()))?;
    let (sender_id, sender_name) = sender_from_json(query.get("from"));

    Ok(Inbound::Callback {
        callback_id: callback_id.to_string(),
        sender_id,
        sender_name,
        chat_id,
        data: data.to_string(),
    })
}

/// Webhook payloads may omit `from`; the sender then counts as id 0
fn sender_from_json(from: Option<&Value>) -> (i64, Option<String>) {
    let id = from.and_then(|f| f.get("id")).and_then(Value::as_i64).unwrap_or(0);
    let name = from
        .and_then(|f| f.get("first_name"))
        .and_then(Value::as_str)
        .map(str::to_string);
    (id, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn adapter() -> InboundAdapter {
        InboundAdapter::default()
    }

    #[test]
    fn test_webhook_check_command() {
        let payload = json!({"message": {"chat": {"id": 42}, "text": "/check 4532015112830366"}});
        let event = adapter().normalize(Inbound::Webhook(payload)).unwrap();
        assert_eq!(
            event.request,
            CommandRequest::new(0, 42, "check", vec!["4532015112830366".to_string()])
        );
        assert!(event.callback_id.is_none());
    }

    #[test]
    fn test_webhook_sender_extracted() {
        let payload = json!({
            "message": {
                "chat": {"id": -100},
                "from": {"id": 7, "first_name": "Ada"},
                "text": "  /STATUS  "
            }
        });
        let event = adapter().normalize(Inbound::Webhook(payload)).unwrap();
        assert_eq!(event.request.sender_id, 7);
        assert_eq!(event.request.sender_name.as_deref(), Some("Ada"));
        assert_eq!(event.request.chat_id, -100);
        assert_eq!(event.request.command, "status");
    }

    #[test]
    fn test_webhook_missing_chat_id() {
        let payload = json!({"message": {"text": "/check 4532015112830366"}});
        let err = adapter().normalize(Inbound::Webhook(payload)).unwrap_err();
        assert!(matches!(err, CommandError::MalformedPayload(_)));
    }

    #[test]
    fn test_webhook_missing_or_blank_text() {
        for payload in [
            json!({"message": {"chat": {"id": 1}}}),
            json!({"message": {"chat": {"id": 1}, "text": "   "}}),
            json!({"message": {"chat": {"id": 1}, "text": 5}}),
        ] {
            let err = adapter().normalize(Inbound::Webhook(payload)).unwrap_err();
            assert!(matches!(err, CommandError::MalformedPayload(_)));
        }
    }

    #[test]
    fn test_webhook_string_chat_id_rejected() {
        let payload = json!({"message": {"chat": {"id": "42"}, "text": "/help"}});
        assert!(adapter().normalize(Inbound::Webhook(payload)).is_err());
    }

    #[test]
    fn test_webhook_without_message() {
        assert!(adapter().normalize(Inbound::Webhook(json!({}))).is_err());
        assert!(adapter().normalize(Inbound::Webhook(json!([1, 2]))).is_err());
    }

    #[test]
    fn test_webhook_callback_query() {
        let payload = json!({
            "callback_query": {
                "id": "cb-1",
                "from": {"id": 9},
                "message": {"chat": {"id": 55}},
                "data": "generate"
            }
        });
        let event = adapter().normalize(Inbound::Webhook(payload)).unwrap();
        assert_eq!(event.callback_id.as_deref(), Some("cb-1"));
        assert_eq!(event.request.command, "generate");
        assert_eq!(event.request.chat_id, 55);
        assert_eq!(event.request.sender_id, 9);
    }

    #[test]
    fn test_structured_passthrough() {
        let event = adapter()
            .normalize(Inbound::Structured {
                sender_id: 3,
                sender_name: Some("Bob".to_string()),
                chat_id: 4,
                command: "/Bin".to_string(),
                args: vec!["457173".to_string()],
            })
            .unwrap();
        assert_eq!(event.request.command, "bin");
        assert_eq!(event.request.args, vec!["457173"]);
        assert_eq!(event.request.sender_id, 3);
        assert_eq!(event.request.chat_id, 4);
    }
}

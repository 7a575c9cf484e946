use crate::domain::traits::KeyboardButton;

/// A normalized command invocation, independent of the transport it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub sender_id: i64,
    pub sender_name: Option<String>,
    pub chat_id: i64,
    /// Lower-cased, without the leading `/`
    pub command: String,
    pub args: Vec<String>,
}

impl CommandRequest {
    pub fn new(sender_id: i64, chat_id: i64, command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            sender_id,
            sender_name: None,
            chat_id,
            command: command.into(),
            args,
        }
    }

    pub fn with_sender_name(mut self, name: Option<String>) -> Self {
        self.sender_name = name;
        self
    }

    /// Arguments joined by a single space and trimmed
    pub fn joined_args(&self) -> String {
        self.args.join(" ").trim().to_string()
    }
}

/// How the transport should render the reply text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    /// Telegram legacy Markdown
    RichText,
}

impl TextFormat {
    pub fn parse_mode(&self) -> Option<&'static str> {
        match self {
            TextFormat::Plain => None,
            TextFormat::RichText => Some("Markdown"),
        }
    }
}

/// Reply produced by a command handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub text: String,
    pub format: TextFormat,
    pub keyboard: Option<Vec<Vec<KeyboardButton>>>,
}

impl CommandResult {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            keyboard: None,
        }
    }

    pub fn rich(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::RichText,
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, rows: Vec<Vec<KeyboardButton>>) -> Self {
        self.keyboard = Some(rows);
        self
    }
}

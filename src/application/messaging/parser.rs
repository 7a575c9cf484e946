//! Message parser - Splits raw text into a command token and arguments

/// Parses incoming text into command tokens
#[derive(Debug, Clone)]
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Normalize a command token: drop one leading marker (`/` or the
    /// configured prefix), drop a `@botname` suffix, lower-case the rest.
    pub fn normalize_command(&self, token: &str) -> String {
        let token = token.trim();
        let without_marker = token
            .strip_prefix('/')
            .or_else(|| {
                (!self.command_prefix.is_empty())
                    .then(|| token.strip_prefix(self.command_prefix.as_str()))
                    .flatten()
            })
            .unwrap_or(token);

        let name = without_marker.split('@').next().unwrap_or_default();
        name.to_lowercase()
    }

    /// Split text into `(command, args)`.
    ///
    /// The command is everything before the first whitespace, normalized;
    /// the arguments are the remaining whitespace-separated tokens.
    /// Returns `None` for blank text.
    pub fn parse_command(&self, text: &str) -> Option<(String, Vec<String>)> {
        let mut parts = text.split_whitespace();
        let first = parts.next()?;
        let args = parts.map(str::to_string).collect();
        Some((self.normalize_command(first), args))
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new("/")
    }
}

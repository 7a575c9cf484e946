//! Application layer errors

use thiserror::Error;

/// Transport and runtime errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Command routing errors
///
/// Every variant is recovered at the router or inbound boundary and turned
/// into a user-facing reply, never surfaced to the transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Carries the usage prompt for the command
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Unauthorized: /{0} is owner-only")]
    Unauthorized(String),

    #[error("Upstream lookup failed: {0}")]
    UpstreamLookupFailed(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Unknown command: /{0}")]
    UnknownCommand(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

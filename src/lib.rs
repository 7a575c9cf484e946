//! Credit card utility bot: Luhn validation, synthetic card numbers and BIN
//! lookups behind Telegram polling and an HTTP webhook.

pub mod application;
pub mod domain;
pub mod infrastructure;

//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Platform integrations (Telegram, console)
//! - Binlist: Issuer metadata lookup over HTTP
//! - Webhook: HTTP endpoint for pushed updates

pub mod adapters;
pub mod binlist;
pub mod config;
pub mod webhook;

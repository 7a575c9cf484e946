//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Commands: One handler per bot command
//! - Services: Checksum engine and command routing
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and inbound normalization

pub mod commands;
pub mod errors;
pub mod services;
pub mod messaging;

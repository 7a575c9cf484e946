//! Domain traits - Abstractions for infrastructure implementations

pub mod bin_lookup;
pub mod bot;

pub use bin_lookup::BinLookup;
pub use bot::{Bot, BotInfo, KeyboardButton};

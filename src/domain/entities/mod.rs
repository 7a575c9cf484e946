//! Domain entities - Core business objects with no external dependencies

pub mod card;
pub mod request;

pub use card::{BinRecord, ValidationOutcome, UNKNOWN};
pub use request::{CommandRequest, CommandResult, TextFormat};

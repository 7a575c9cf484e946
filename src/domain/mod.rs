//! Domain layer - Core business objects and the seams to the outside world
//!
//! This layer contains:
//! - Entities: Requests, results and card data (CommandRequest, BinRecord)
//! - Traits: Abstractions for infrastructure (Bot, BinLookup)

pub mod entities;
pub mod traits;

//! Message handling - Turning transport events into command requests

pub mod inbound;
pub mod parser;

pub use inbound::{Inbound, InboundAdapter, InboundEvent};
pub use parser::MessageParser;

//! Application services - Business logic orchestration

pub mod checksum;
pub mod command_router;
pub mod responder;

pub use checksum::ChecksumEngine;
pub use command_router::CommandRouter;
pub use responder::respond;

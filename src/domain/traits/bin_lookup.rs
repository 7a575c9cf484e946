use async_trait::async_trait;
use crate::domain::entities::BinRecord;
use crate::application::errors::CommandError;

/// BinLookup trait - abstraction over the issuer metadata service
///
/// Implementations fail with `CommandError::UpstreamLookupFailed` when the
/// service is unreachable, times out, or answers with something unparseable.
#[async_trait]
pub trait BinLookup: Send + Sync {
    async fn lookup(&self, bin: &str) -> Result<BinRecord, CommandError>;
}

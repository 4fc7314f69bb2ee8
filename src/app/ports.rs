use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Source of the raw benefits payload.
///
/// One call is one attempt: implementations do not retry. Any transport
/// failure, non-2xx status or undecodable body is an `Err`.
#[async_trait]
pub trait BenefitsSource: Send + Sync {
    /// Where the payload comes from, for logs
    fn endpoint(&self) -> &str;

    async fn fetch_payload(&self) -> Result<Value>;
}

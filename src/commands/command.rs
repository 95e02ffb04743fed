// Command trait - the interface for all operational modes

use crate::Result;
use async_trait::async_trait;

/// One operational mode of CredNag, encapsulated as an executable object.
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command asynchronously
    async fn execute(&self) -> Result<()>;

    /// Human-readable name for logging and debugging
    fn name(&self) -> &'static str;
}

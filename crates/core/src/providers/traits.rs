use async_trait::async_trait;

use crate::errors::CoreError;

/// Where the dashboard's JSON documents come from.
///
/// Each backend (HTTP, local files) implements this trait, so the dashboard
/// never knows whether it is reading a hosted snapshot or a file on disk.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DocumentSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the raw document at `location`. One attempt, no retry.
    async fn fetch(&self, location: &str) -> Result<String, CoreError>;
}

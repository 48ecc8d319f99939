use crate::error::Result;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Storage contract shared by every backend.
///
/// Records are immutable: a code is stored at most once and is never
/// updated or removed.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Stores `original_url` under `code`.
    ///
    /// Returns `Err(AlreadyExists)` if the code is taken. The existing value
    /// is left untouched.
    async fn save(&self, code: &ShortCode, original_url: &str) -> Result<()>;

    /// Returns the original URL stored under `code`.
    ///
    /// Returns `Err(NotFound)` if the code was never saved.
    async fn get(&self, code: &ShortCode) -> Result<String>;
}

/// Connectivity health check for backends that talk to a remote store.
#[async_trait]
pub trait Ping: Send + Sync + 'static {
    async fn ping(&self) -> Result<()>;
}

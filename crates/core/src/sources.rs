//! Upstream collaborators the game depends on.

use async_trait::async_trait;

use crate::player::RawPlayerEntry;

/// Errors from an upstream source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request could not be completed (network, DNS, TLS, timeout).
    #[error("Upstream request failed: {0}")]
    Request(String),

    /// The upstream answered with a non-2xx status.
    #[error("Upstream returned HTTP {0}")]
    HttpStatus(u16),

    /// The body could not be interpreted.
    #[error("Upstream response could not be decoded: {0}")]
    Decode(String),
}

/// Provider of the candidate player pool.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Fetch the unshuffled pool from every configured feed.
    ///
    /// Feeds that fail are left out of the result. `Err` means the fetch as
    /// a whole could not run.
    async fn fetch_pool(&self) -> Result<Vec<RawPlayerEntry>, SourceError>;
}

/// Fetcher of raw photo bytes.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

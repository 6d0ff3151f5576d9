//! HTTP implementations of the upstream collaborators.
//!
//! - [`ApiFootballSource`] pulls "top scorers" feeds from api-sports.
//! - [`HttpImageSource`] downloads player photos.
//!
//! Both share one [`reqwest::Client`] built by [`build_client`].

pub mod api_football;
pub mod config;
pub mod photos;

use std::time::Duration;

use guessr_core::sources::SourceError;

pub use api_football::ApiFootballSource;
pub use config::ProviderConfig;
pub use photos::HttpImageSource;

/// Errors from the provider HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status code.
    #[error("Upstream returned HTTP {0}")]
    HttpStatus(u16),

    /// The body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ProviderError> for SourceError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Request(e) => SourceError::Request(e.to_string()),
            ProviderError::HttpStatus(status) => SourceError::HttpStatus(status),
            ProviderError::Json(e) => SourceError::Decode(e.to_string()),
        }
    }
}

/// Build the shared HTTP client with a per-request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

//! Client for the api-sports football "top scorers" endpoint.

use async_trait::async_trait;
use guessr_core::player::RawPlayerEntry;
use guessr_core::sources::{PlayerSource, SourceError};
use serde::Deserialize;

use crate::config::ProviderConfig;
use crate::ProviderError;

const API_KEY_HEADER: &str = "x-apisports-key";

/// Envelope of every api-sports response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    response: Vec<RawPlayerEntry>,
}

/// [`PlayerSource`] backed by one top-scorers request per configured league.
pub struct ApiFootballSource {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl ApiFootballSource {
    pub fn new(client: reqwest::Client, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the top scorers of one league for the configured season.
    pub async fn fetch_league(&self, league: &str) -> Result<Vec<RawPlayerEntry>, ProviderError> {
        let response = self
            .client
            .get(format!("{}/players/topscorers", self.config.base_url))
            .header(API_KEY_HEADER, &self.config.api_key)
            .query(&[("league", league), ("season", self.config.season.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        let parsed: ApiResponse = serde_json::from_slice(&body)?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl PlayerSource for ApiFootballSource {
    async fn fetch_pool(&self) -> Result<Vec<RawPlayerEntry>, SourceError> {
        let mut pool = Vec::new();

        for league in &self.config.leagues {
            match self.fetch_league(league).await {
                Ok(entries) => {
                    tracing::debug!(league, count = entries.len(), "Fetched league top scorers");
                    pool.extend(entries);
                }
                Err(e) => {
                    tracing::warn!(league, error = %e, "League feed unavailable, skipping");
                }
            }
        }

        Ok(pool)
    }
}

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";

/// Premier League, La Liga, Serie A, Bundesliga.
const DEFAULT_LEAGUES: &str = "39,140,135,78";

const DEFAULT_SEASON: &str = "2022";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the upstream player-statistics provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Sent as the `x-apisports-key` header.
    pub api_key: String,
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Competition ids queried, in order.
    pub leagues: Vec<String>,
    pub season: String,
    /// Applied to every outbound request, photo downloads included.
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Load provider settings from the environment.
    ///
    /// | Env Var                 | Default                              |
    /// |-------------------------|--------------------------------------|
    /// | `API_KEY`               | required                             |
    /// | `API_BASE_URL`          | `https://v3.football.api-sports.io`  |
    /// | `API_LEAGUES`           | `39,140,135,78`                      |
    /// | `API_SEASON`            | `2022`                               |
    /// | `UPSTREAM_TIMEOUT_SECS` | `10`                                 |
    pub fn from_env() -> Self {
        let api_key = std::env::var("API_KEY").expect("API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "API_KEY must not be empty");

        let base_url = std::env::var("API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let leagues = parse_list(
            &std::env::var("API_LEAGUES").unwrap_or_else(|_| DEFAULT_LEAGUES.into()),
        );

        let season = std::env::var("API_SEASON").unwrap_or_else(|_| DEFAULT_SEASON.into());

        let timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            leagues,
            season,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

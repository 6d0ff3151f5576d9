use std::path::PathBuf;

use guessr_provider::config::{parse_list, ProviderConfig};

/// Server configuration loaded from environment variables.
///
/// Everything except the provider API key has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Daily cache record location.
    pub cache_file: PathBuf,
    /// Autocomplete name list location.
    pub player_names_file: PathBuf,
    /// Period of the daily reset task in seconds (default: one day).
    pub daily_check_interval_secs: u64,
    /// Upstream player provider.
    pub provider: ProviderConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                   |
    /// |-----------------------------|---------------------------|
    /// | `HOST`                      | `0.0.0.0`                 |
    /// | `PORT`                      | `5000`                    |
    /// | `CORS_ORIGINS`              | `*`                       |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                      |
    /// | `CACHE_FILE`                | `daily_player_cache.json` |
    /// | `PLAYER_NAMES_FILE`         | `player_names.json`       |
    /// | `DAILY_CHECK_INTERVAL_SECS` | `86400`                   |
    ///
    /// Provider variables are documented on [`ProviderConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(&std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()));

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cache_file = std::env::var("CACHE_FILE")
            .unwrap_or_else(|_| "daily_player_cache.json".into())
            .into();

        let player_names_file = std::env::var("PLAYER_NAMES_FILE")
            .unwrap_or_else(|_| "player_names.json".into())
            .into();

        let daily_check_interval_secs: u64 = std::env::var("DAILY_CHECK_INTERVAL_SECS")
            .unwrap_or_else(|_| "86400".into())
            .parse()
            .expect("DAILY_CHECK_INTERVAL_SECS must be a valid u64");
        assert!(
            daily_check_interval_secs > 0,
            "DAILY_CHECK_INTERVAL_SECS must be positive"
        );

        let provider = ProviderConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cache_file,
            player_names_file,
            daily_check_interval_secs,
            provider,
        }
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

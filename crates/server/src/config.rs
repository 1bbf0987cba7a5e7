//! Server configuration

use std::time::Duration;

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the blockchain node's REST API
    pub node_api_url: String,
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    /// Upper bound on a single upstream request
    pub upstream_timeout: Duration,
    pub rate_limit_rps: u32,
}

impl Config {
    pub const DEFAULT_NODE_API_URL: &'static str = "http://localhost:1317";
    pub const DEFAULT_BIND_ADDRESS: &'static str = "0.0.0.0:8000";
    pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 100;

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let node_api_url = lookup("NODE_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_NODE_API_URL.into());

        let cors_origins = lookup("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec!["*".to_string()]);

        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or(Self::DEFAULT_UPSTREAM_TIMEOUT_SECS);

        let rate_limit_rps = lookup("RATE_LIMIT_RPS")
            .and_then(|s| s.parse().ok())
            .filter(|&rps: &u32| rps > 0)
            .unwrap_or(Self::DEFAULT_RATE_LIMIT_RPS);

        Self {
            node_api_url,
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| Self::DEFAULT_BIND_ADDRESS.into()),
            cors_origins,
            upstream_timeout: Duration::from_secs(timeout_secs),
            rate_limit_rps,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key, sent as the `api_key` query parameter
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Image CDN prefix for posters
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Image CDN prefix for provider logos
    #[serde(default = "default_logo_base_url")]
    pub logo_base_url: String,

    /// Shown when a movie has no poster
    #[serde(default = "default_poster_placeholder_url")]
    pub poster_placeholder_url: String,

    /// Country code whose flat-rate providers are reported
    #[serde(default = "default_watch_region")]
    pub watch_region: String,

    /// Overview truncation budget in characters
    #[serde(default = "default_overview_limit")]
    pub overview_limit: usize,

    /// Maximum provider lookups in flight per batch
    #[serde(default = "default_lookup_concurrency")]
    pub lookup_concurrency: usize,

    /// Per-request timeout for TMDB calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_logo_base_url() -> String {
    "https://image.tmdb.org/t/p/w45".to_string()
}

fn default_poster_placeholder_url() -> String {
    "https://via.placeholder.com/300x450?text=No+Image".to_string()
}

fn default_watch_region() -> String {
    "IN".to_string()
}

fn default_overview_limit() -> usize {
    60
}

fn default_lookup_concurrency() -> usize {
    8
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs (upper-case keys)
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path every route is nested under, e.g. `/riverr`
    #[serde(default)]
    pub url_prefix: String,

    /// Radarr API base URL
    #[serde(default = "default_radarr_url")]
    pub radarr_url: String,

    #[serde(default)]
    pub radarr_key: String,

    /// Sonarr API base URL
    #[serde(default = "default_sonarr_url")]
    pub sonarr_url: String,

    #[serde(default)]
    pub sonarr_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_url")]
    pub tmdb_url: String,

    /// TMDB read access token (bearer)
    pub tmdb_key: String,

    /// Prefix joined with a TMDB `poster_path`
    #[serde(default = "default_tmdb_poster_url")]
    pub tmdb_poster_url: String,

    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Deluge web JSON-RPC endpoint
    #[serde(default = "default_deluge_url")]
    pub deluge_url: String,

    /// Deluge web UI password
    #[serde(default)]
    pub deluge_key: String,

    /// Jackett indexers endpoint
    #[serde(default = "default_jackett_url")]
    pub jackett_url: String,

    #[serde(default)]
    pub jackett_key: String,

    /// Timeout applied to every upstream call
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Discover page used for recommendations. Page 1 is all blockbusters.
    #[serde(default = "default_recommendation_page")]
    pub recommendation_page: u32,

    #[serde(default = "default_recommendation_sort")]
    pub recommendation_sort: String,

    /// Quality profile assigned to titles added through the API
    #[serde(default = "default_quality_profile_id")]
    pub quality_profile_id: u32,

    #[serde(default = "default_movie_root_folder")]
    pub movie_root_folder: String,

    #[serde(default = "default_series_root_folder")]
    pub series_root_folder: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_radarr_url() -> String {
    "http://localhost:7878/api/v3".to_string()
}

fn default_sonarr_url() -> String {
    "http://localhost:8989/api/v3".to_string()
}

fn default_tmdb_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_poster_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

fn default_tmdb_language() -> String {
    "en".to_string()
}

fn default_deluge_url() -> String {
    "http://localhost:8112/json".to_string()
}

fn default_jackett_url() -> String {
    "http://localhost:9117/api/v2.0/indexers".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_recommendation_page() -> u32 {
    2
}

fn default_recommendation_sort() -> String {
    "popularity.desc".to_string()
}

fn default_quality_profile_id() -> u32 {
    1
}

fn default_movie_root_folder() -> String {
    "/movie".to_string()
}

fn default_series_root_folder() -> String {
    "/tv".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

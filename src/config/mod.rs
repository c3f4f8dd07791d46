mod file_config;

pub use file_config::FileConfig;

use std::time::Duration;

/// Default base URL for the REST metadata endpoints.
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Default endpoint for structured (GraphQL) metadata queries.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api-partner.spotify.com/pathfinder/v1/query";

/// Resolved settings for the stats pipeline.
///
/// Defaults match the remote API's documented limits; hosts override them
/// through [`FileConfig`] or by mutating the struct directly. Tests set
/// `retry_delay` to `Duration::ZERO` so retry paths run without real timers.
#[derive(Debug, Clone)]
pub struct StatsSettings {
    /// Base URL for REST metadata endpoints.
    pub api_base_url: String,
    /// Endpoint for structured metadata queries.
    pub graphql_url: String,
    /// Maximum identifiers per audio-features request.
    pub audio_features_batch_size: usize,
    /// Maximum identifiers in the single artists request; the ranked input
    /// is truncated to this, never split.
    pub artists_request_limit: usize,
    /// Maximum entries in any ranked or breakdown list.
    pub ranked_list_limit: usize,
    /// Total transport attempts per request before resolving absent.
    pub max_attempts: u32,
    /// Fixed delay between consecutive attempts.
    pub retry_delay: Duration,
    /// Request timeout for the bundled HTTP transport.
    pub request_timeout_secs: u64,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            audio_features_batch_size: 100,
            artists_request_limit: 50,
            ranked_list_limit: 10,
            max_attempts: 10,
            retry_delay: Duration::from_secs(5),
            request_timeout_secs: 30,
        }
    }
}

impl StatsSettings {
    /// Resolve settings from an optional TOML file config.
    /// File values override defaults where present.
    pub fn resolve(file_config: Option<FileConfig>) -> Self {
        let file = file_config.unwrap_or_default();
        let defaults = Self::default();

        Self {
            api_base_url: file.api_base_url.unwrap_or(defaults.api_base_url),
            graphql_url: file.graphql_url.unwrap_or(defaults.graphql_url),
            audio_features_batch_size: file
                .audio_features_batch_size
                .unwrap_or(defaults.audio_features_batch_size),
            artists_request_limit: file
                .artists_request_limit
                .unwrap_or(defaults.artists_request_limit),
            ranked_list_limit: file.ranked_list_limit.unwrap_or(defaults.ranked_list_limit),
            max_attempts: file.max_attempts.unwrap_or(defaults.max_attempts),
            retry_delay: file
                .retry_delay_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.retry_delay),
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}

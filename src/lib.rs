//! Listening Stats Core
//!
//! The fetch/aggregation pipeline behind a listening-statistics feature:
//! validates Spotify-style entity identifiers, batches them into size-capped
//! requests, fetches metadata concurrently with bounded retries, and reduces
//! the responses into ranked top lists and frequency breakdowns.
//!
//! Persistence and HTTP transport are injected collaborators; see
//! [`state_store::StateStore`] and [`spotify::MetadataTransport`].

pub mod config;
pub mod ids;
pub mod page_cache;
pub mod rankings;
pub mod spotify;
pub mod state_store;

// Re-export commonly used types for convenience
pub use config::StatsSettings;
pub use page_cache::{PageCacheGate, RefreshPass, TimeRange};
pub use rankings::{rank_albums, rank_artists, AlbumRankings, ArtistRankings, RankedEntry};
pub use spotify::{
    fetch_audio_features, HttpMetadataTransport, MetadataTransport, ResilientFetcher,
    TransportError,
};
pub use state_store::{InMemoryStateStore, StateStore};

//! Remote metadata access: transport boundary, resilient fetching, and the
//! audio-features fan-out.

mod audio_features;
mod fetcher;
pub mod models;
mod transport;

pub use audio_features::fetch_audio_features;
pub use fetcher::ResilientFetcher;
pub use transport::{HttpMetadataTransport, MetadataTransport, TransportError};

#[cfg(feature = "mock")]
pub use transport::MockMetadataTransport;

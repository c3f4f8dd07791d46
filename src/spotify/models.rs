//! Serde envelopes for the remote payload shapes the pipeline reads.
//!
//! Only the fields the reducers touch are modeled; everything else in the
//! payloads passes through or is ignored. Fields are optional wherever the
//! remote has been observed to omit them.

use serde::Deserialize;
use serde_json::Value;

/// One page of an audio-features batch response.
///
/// Entries are kept as raw values: the feature schema belongs to the remote
/// API, and item-level nulls (deleted tracks) are passed through as-is.
#[derive(Debug, Deserialize)]
pub struct AudioFeaturesPage {
    #[serde(default)]
    pub audio_features: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// One artist from the batched artists endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistMeta {
    pub id: String,
    pub name: Option<String>,
    pub uri: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Top-level album query response.
#[derive(Debug, Deserialize)]
pub struct AlbumQueryResponse {
    pub data: Option<AlbumQueryData>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumQueryData {
    #[serde(rename = "albumUnion")]
    pub album_union: Option<AlbumUnion>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumUnion {
    pub name: Option<String>,
    pub uri: Option<String>,
    pub date: Option<AlbumDate>,
    #[serde(rename = "coverArt")]
    pub cover_art: Option<CoverArt>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumDate {
    #[serde(rename = "isoString")]
    pub iso_string: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverArt {
    #[serde(default)]
    pub sources: Vec<ImageRef>,
}

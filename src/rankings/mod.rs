//! Ranked summaries and frequency breakdowns.

mod albums;
mod artists;

pub use albums::rank_albums;
pub use artists::{rank_artists, ARTIST_IMAGE_PLACEHOLDER};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display-ready summary of one ranked entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    pub uri: String,
    /// Cover or portrait URL. Artists always carry one (a fixed placeholder
    /// when the payload has none); albums carry whatever the payload provides.
    pub image: Option<String>,
    /// Play count copied from the caller's frequency input.
    pub frequency: u32,
}

/// Output of the album reducer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumRankings {
    pub top_albums: Vec<RankedEntry>,
    /// Release year → accumulated weight, descending.
    pub release_years: Vec<(String, u64)>,
    /// Weight of every validated key requested, including keys whose
    /// metadata was unavailable and entries truncated from the top list.
    pub total_weight: u64,
}

/// Output of the artist reducer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistRankings {
    pub top_artists: Vec<RankedEntry>,
    /// Genre → accumulated weight, descending. Every genre an artist is
    /// tagged with receives the artist's full weight.
    pub top_genres: Vec<(String, u64)>,
    /// Weight of the artists actually returned by the remote.
    pub total_weight: u64,
}

/// Insertion-ordered frequency accumulator.
///
/// Keys keep first-encountered order, so the stable descending sort in
/// [`Breakdown::into_sorted_top`] breaks weight ties by input order.
#[derive(Debug, Default)]
pub(crate) struct Breakdown {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Breakdown {
    pub fn add(&mut self, key: &str, weight: u64) {
        match self.index.get(key) {
            Some(&position) => self.entries[position].1 += weight,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), weight));
            }
        }
    }

    /// Sort descending by accumulated weight and truncate to `limit`.
    pub fn into_sorted_top(mut self, limit: usize) -> Vec<(String, u64)> {
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        self.entries.truncate(limit);
        self.entries
    }
}

/// Validate, pair with counts, and stable-sort descending by count.
///
/// Returns borrowed ids; ties keep the caller's order (first-encountered
/// wins) because the sort is stable.
pub(crate) fn ranked_valid_keys(plays: &[(String, u32)]) -> Vec<(&str, u32)> {
    let mut ranked: Vec<(&str, u32)> = plays
        .iter()
        .filter(|(id, _)| crate::ids::is_valid_id(id))
        .map(|(id, count)| (id.as_str(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

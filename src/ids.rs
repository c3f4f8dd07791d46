//! Identifier validation and batch planning.
//!
//! Spotify-style entity identifiers are 22-character base-62 tokens. Anything
//! else is dropped before it can reach a request URL.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ENTITY_ID_RE: Regex = Regex::new("^[A-Za-z0-9]{22}$").unwrap();
}

/// Check whether a single identifier has the valid lexical shape.
pub fn is_valid_id(id: &str) -> bool {
    ENTITY_ID_RE.is_match(id)
}

/// Filter a list of candidate identifiers down to the valid ones.
///
/// Order-preserving; malformed input simply yields a smaller output.
pub fn filter_valid_ids(ids: &[String]) -> Vec<String> {
    ids.iter()
        .filter(|id| is_valid_id(id))
        .cloned()
        .collect()
}

/// Split an ordered identifier list into contiguous chunks of at most
/// `chunk_size` elements, preserving order within and across chunks.
///
/// `chunk_size` must be greater than zero. An empty input yields zero chunks.
pub fn chunk_ids(ids: &[String], chunk_size: usize) -> Vec<Vec<String>> {
    ids.chunks(chunk_size).map(|chunk| chunk.to_vec()).collect()
}

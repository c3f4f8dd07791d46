//! Album ranking reducer.

use futures::future::join_all;
use tracing::warn;

use crate::config::StatsSettings;
use crate::rankings::{ranked_valid_keys, AlbumRankings, Breakdown, RankedEntry};
use crate::spotify::models::{AlbumQueryResponse, AlbumUnion};
use crate::spotify::MetadataTransport;

/// Query definition name for single-album metadata lookups.
const ALBUM_QUERY: &str = "getAlbum";

/// Rank albums by play count and break accumulated weight down by release
/// year.
///
/// Metadata for every validated key is requested concurrently through the
/// structured query interface; results come back in ranked order. Keys whose
/// metadata is unavailable are dropped from the top list and the year
/// breakdown, but their weight still counts toward the total: the total
/// reflects requested weight, the breakdown only resolvable items.
pub async fn rank_albums(
    transport: &dyn MetadataTransport,
    settings: &StatsSettings,
    plays: &[(String, u32)],
) -> AlbumRankings {
    let ranked = ranked_valid_keys(plays);
    let total_weight: u64 = ranked.iter().map(|(_, count)| *count as u64).sum();

    let requests = ranked.iter().map(|(id, count)| {
        let variables = serde_json::json!({
            "uri": format!("spotify:album:{}", id),
            "locale": "en",
            "offset": 0,
            "limit": 50,
        });
        async move {
            match transport.request(ALBUM_QUERY, variables).await {
                Ok(payload) => resolve_album(*id, payload).map(|album| (album, *count)),
                Err(e) => {
                    warn!(album = id, "Album metadata request failed: {}", e);
                    None
                }
            }
        }
    });

    let mut release_years = Breakdown::default();
    let mut top_albums = Vec::new();

    for (album, count) in join_all(requests).await.into_iter().flatten() {
        if let Some(year) = release_year(&album) {
            release_years.add(year, count as u64);
        }

        // Resolution guarantees name and uri are present.
        top_albums.push(RankedEntry {
            name: album.name.unwrap_or_default(),
            uri: album.uri.unwrap_or_default(),
            image: album
                .cover_art
                .and_then(|art| art.sources.into_iter().next())
                .map(|source| source.url),
            frequency: count,
        });
    }

    top_albums.truncate(settings.ranked_list_limit);

    AlbumRankings {
        top_albums,
        release_years: release_years.into_sorted_top(settings.ranked_list_limit),
        total_weight,
    }
}

/// Extract the album payload when it is usable for ranking.
fn resolve_album(id: &str, payload: serde_json::Value) -> Option<AlbumUnion> {
    let response: AlbumQueryResponse = match serde_json::from_value(payload) {
        Ok(response) => response,
        Err(e) => {
            warn!(album = id, "Malformed album response: {}", e);
            return None;
        }
    };

    let album = response.data?.album_union?;
    if album.name.is_none() || album.uri.is_none() {
        return None;
    }
    Some(album)
}

fn release_year(album: &AlbumUnion) -> Option<&str> {
    album.date.as_ref()?.iso_string.as_deref()?.get(..4)
}

//! Artist ranking reducer.

use std::collections::HashMap;
use tracing::warn;

use crate::config::StatsSettings;
use crate::rankings::{ranked_valid_keys, ArtistRankings, Breakdown, RankedEntry};
use crate::spotify::models::ArtistMeta;
use crate::spotify::ResilientFetcher;

/// Placeholder portrait for artists whose payload carries no usable image.
pub const ARTIST_IMAGE_PLACEHOLDER: &str =
    "https://commons.wikimedia.org/wiki/File:Black_square.jpg";

/// Rank artists by play count and break accumulated weight down by genre.
///
/// The ranked input is truncated to the batch ceiling before the single
/// request — never split into multiple requests. Each returned artist
/// contributes its full weight to every genre it is tagged with. An absent
/// fetch result degrades to empty rankings; no error crosses this boundary.
pub async fn rank_artists(
    fetcher: &ResilientFetcher,
    settings: &StatsSettings,
    plays: &[(String, u32)],
) -> ArtistRankings {
    if plays.is_empty() {
        return ArtistRankings::default();
    }

    let mut ranked = ranked_valid_keys(plays);
    ranked.truncate(settings.artists_request_limit);
    if ranked.is_empty() {
        return ArtistRankings::default();
    }

    let counts: HashMap<&str, u32> = ranked.iter().copied().collect();
    let ids: Vec<&str> = ranked.iter().map(|(id, _)| *id).collect();
    let url = format!("{}/artists?ids={}", settings.api_base_url, ids.join(","));

    let Some(payload) = fetcher.get("artistsMetadata", &url).await else {
        return ArtistRankings::default();
    };

    let entries = payload
        .get("artists")
        .and_then(|artists| artists.as_array())
        .cloned()
        .unwrap_or_default();

    let mut genres = Breakdown::default();
    let mut total_weight = 0u64;
    let mut top_artists = Vec::new();

    for entry in entries {
        if entry.is_null() {
            continue;
        }
        let artist: ArtistMeta = match serde_json::from_value(entry) {
            Ok(artist) => artist,
            Err(e) => {
                warn!("Malformed artist entry: {}", e);
                continue;
            }
        };

        let Some(&weight) = counts.get(artist.id.as_str()) else {
            warn!(artist = %artist.id, "Artist not in requested set, skipping");
            continue;
        };

        for genre in &artist.genres {
            genres.add(genre, weight as u64);
        }
        total_weight += weight as u64;

        let (Some(name), Some(uri)) = (artist.name, artist.uri) else {
            continue;
        };
        let image = artist
            .images
            .get(2)
            .map(|image| image.url.clone())
            .unwrap_or_else(|| ARTIST_IMAGE_PLACEHOLDER.to_string());

        top_artists.push(RankedEntry {
            name,
            uri,
            image: Some(image),
            frequency: weight,
        });
    }

    top_artists.truncate(settings.ranked_list_limit);

    ArtistRankings {
        top_artists,
        top_genres: genres.into_sorted_top(settings.ranked_list_limit),
        total_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spotify::{MetadataTransport, TransportError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers every GET with one canned artists page, recording the URL.
    struct ArtistsTransport {
        payload: Result<Value, ()>,
        requests: Mutex<Vec<String>>,
    }

    impl ArtistsTransport {
        fn ok(payload: Value) -> Self {
            Self {
                payload: Ok(payload),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                payload: Err(()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MetadataTransport for ArtistsTransport {
        async fn get(&self, url: &str) -> Result<Value, TransportError> {
            self.requests.lock().unwrap().push(url.to_string());
            match &self.payload {
                Ok(value) => Ok(value.clone()),
                Err(()) => Err(TransportError::Status(500)),
            }
        }

        async fn request(
            &self,
            _definition: &str,
            _variables: Value,
        ) -> Result<Value, TransportError> {
            Err(TransportError::Status(500))
        }
    }

    fn test_settings() -> StatsSettings {
        StatsSettings {
            max_attempts: 1,
            retry_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    fn id(n: usize) -> String {
        format!("{:022}", n)
    }

    fn artist(artist_id: &str, name: &str, genres: &[&str]) -> Value {
        json!({
            "id": artist_id,
            "name": name,
            "uri": format!("spotify:artist:{}", artist_id),
            "genres": genres,
            "images": [
                {"url": "https://img/640"},
                {"url": "https://img/320"},
                {"url": "https://img/160"},
            ],
        })
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let transport = Arc::new(ArtistsTransport::ok(json!({"artists": []})));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let rankings = rank_artists(&fetcher, &settings, &[]).await;

        assert!(rankings.top_artists.is_empty());
        assert!(rankings.top_genres.is_empty());
        assert_eq!(rankings.total_weight, 0);
        assert!(transport.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_genre_gets_full_artist_weight() {
        let transport = Arc::new(ArtistsTransport::ok(json!({
            "artists": [artist(&id(1), "A", &["pop", "rock"])],
        })));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let plays = vec![(id(1), 4)];
        let rankings = rank_artists(&fetcher, &settings, &plays).await;

        // 4 to both genres, not 2 each.
        assert_eq!(
            rankings.top_genres,
            vec![("pop".to_string(), 4), ("rock".to_string(), 4)]
        );
        assert_eq!(rankings.total_weight, 4);
    }

    #[tokio::test]
    async fn test_null_entries_are_skipped() {
        let transport = Arc::new(ArtistsTransport::ok(json!({
            "artists": [null, artist(&id(1), "A", &["pop"])],
        })));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let plays = vec![(id(1), 3), (id(2), 2)];
        let rankings = rank_artists(&fetcher, &settings, &plays).await;

        assert_eq!(rankings.top_artists.len(), 1);
        assert_eq!(rankings.top_artists[0].name, "A");
        // Only the returned artist contributes to the total.
        assert_eq!(rankings.total_weight, 3);
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_empty() {
        let transport = Arc::new(ArtistsTransport::failing());
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let plays = vec![(id(1), 3)];
        let rankings = rank_artists(&fetcher, &settings, &plays).await;

        assert!(rankings.top_artists.is_empty());
        assert!(rankings.top_genres.is_empty());
        assert_eq!(rankings.total_weight, 0);
    }

    #[tokio::test]
    async fn test_truncates_to_batch_ceiling_before_request() {
        let transport = Arc::new(ArtistsTransport::ok(json!({"artists": []})));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        // 60 ids with descending counts; only the top 50 may be requested.
        let plays: Vec<(String, u32)> = (0..60).map(|i| (id(i), 100 - i as u32)).collect();
        rank_artists(&fetcher, &settings, &plays).await;

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let ids_param = requests[0].split("ids=").nth(1).unwrap();
        let requested: Vec<&str> = ids_param.split(',').collect();
        assert_eq!(requested.len(), 50);
        assert_eq!(requested[0], id(0));
        assert_eq!(requested[49], id(49));
    }

    #[tokio::test]
    async fn test_request_url_shape() {
        let transport = Arc::new(ArtistsTransport::ok(json!({"artists": []})));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let plays = vec![(id(2), 1), (id(1), 5)];
        rank_artists(&fetcher, &settings, &plays).await;

        let requests = transport.requests.lock().unwrap();
        assert_eq!(
            requests[0],
            format!(
                "https://api.spotify.com/v1/artists?ids={},{}",
                id(1),
                id(2)
            )
        );
    }

    #[tokio::test]
    async fn test_top_lists_truncate_to_ten() {
        let artists: Vec<Value> = (0..15)
            .map(|i| {
                let genre = format!("genre{}", i);
                artist(&id(i), &format!("A{}", i), &[genre.as_str()])
            })
            .collect();
        let transport = Arc::new(ArtistsTransport::ok(json!({"artists": artists})));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let plays: Vec<(String, u32)> = (0..15).map(|i| (id(i), 50 - i as u32)).collect();
        let rankings = rank_artists(&fetcher, &settings, &plays).await;

        assert_eq!(rankings.top_artists.len(), 10);
        assert_eq!(rankings.top_genres.len(), 10);
        // Order follows the pre-fetch sort by frequency.
        assert_eq!(rankings.top_artists[0].name, "A0");
        assert_eq!(rankings.top_artists[9].name, "A9");
    }

    #[tokio::test]
    async fn test_image_fallback_to_placeholder() {
        let mut bare = artist(&id(1), "A", &[]);
        bare["images"] = json!([]);
        let transport = Arc::new(ArtistsTransport::ok(json!({"artists": [bare]})));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let plays = vec![(id(1), 1)];
        let rankings = rank_artists(&fetcher, &settings, &plays).await;

        assert_eq!(
            rankings.top_artists[0].image.as_deref(),
            Some(ARTIST_IMAGE_PLACEHOLDER)
        );
    }

    #[tokio::test]
    async fn test_third_image_is_preferred() {
        let transport = Arc::new(ArtistsTransport::ok(json!({
            "artists": [artist(&id(1), "A", &[])],
        })));
        let settings = test_settings();
        let fetcher = ResilientFetcher::new(transport.clone(), &settings);

        let plays = vec![(id(1), 1)];
        let rankings = rank_artists(&fetcher, &settings, &plays).await;

        assert_eq!(
            rankings.top_artists[0].image.as_deref(),
            Some("https://img/160")
        );
    }
}

//! Concurrent fan-out fetch of audio features for large track sets.

use futures::future::join_all;
use serde_json::Value;
use tracing::warn;

use crate::config::StatsSettings;
use crate::ids::{chunk_ids, filter_valid_ids};
use crate::spotify::fetcher::ResilientFetcher;
use crate::spotify::models::AudioFeaturesPage;

/// Fetch audio features for every valid id, batching by the configured size.
///
/// All batch requests are in flight simultaneously; the merged output follows
/// batch submission order regardless of completion order. A failed batch
/// contributes nothing rather than aborting the whole operation, so a
/// degraded run yields a smaller result, never an error. Item-level nulls
/// inside a successful page are passed through untouched.
pub async fn fetch_audio_features(
    fetcher: &ResilientFetcher,
    settings: &StatsSettings,
    ids: &[String],
) -> Vec<Value> {
    let valid = filter_valid_ids(ids);
    let batches = chunk_ids(&valid, settings.audio_features_batch_size);

    let requests = batches.iter().enumerate().map(|(index, batch)| {
        let name = format!("audioFeaturesBatch{}", index);
        let url = format!(
            "{}/audio-features?ids={}",
            settings.api_base_url,
            batch.join(",")
        );
        async move { (index, fetcher.get(&name, &url).await) }
    });

    let responses = join_all(requests).await;

    let mut merged = Vec::with_capacity(valid.len());
    for (index, response) in responses {
        let Some(payload) = response else {
            warn!(batch = index, "Audio features batch failed, skipping");
            continue;
        };

        match serde_json::from_value::<AudioFeaturesPage>(payload) {
            Ok(page) => merged.extend(page.audio_features),
            Err(e) => warn!(batch = index, "Malformed audio features page: {}", e),
        }
    }

    merged
}

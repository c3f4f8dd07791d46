//! Resilient fetcher: bounded retries over the metadata transport.

use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::StatsSettings;
use crate::spotify::transport::MetadataTransport;

/// Wraps the transport with a bounded retry loop and a fixed inter-attempt
/// delay. All failures collapse to an absent result; no error ever leaves
/// this boundary.
pub struct ResilientFetcher {
    transport: Arc<dyn MetadataTransport>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl ResilientFetcher {
    pub fn new(transport: Arc<dyn MetadataTransport>, settings: &StatsSettings) -> Self {
        Self {
            transport,
            max_attempts: settings.max_attempts,
            retry_delay: settings.retry_delay,
        }
    }

    /// Fetch `url` with the configured attempt budget.
    ///
    /// `name` labels the request in diagnostics.
    pub async fn get(&self, name: &str, url: &str) -> Option<Value> {
        self.get_with_attempts(name, url, self.max_attempts).await
    }

    /// Fetch `url` with an explicit attempt budget.
    ///
    /// The transport is called at most `max_attempts` times, sleeping the
    /// configured delay between consecutive attempts. Exhaustion resolves to
    /// `None`; a zero budget resolves to `None` without any call.
    pub async fn get_with_attempts(
        &self,
        name: &str,
        url: &str,
        max_attempts: u32,
    ) -> Option<Value> {
        for attempt in 1..=max_attempts {
            let started = Instant::now();
            match self.transport.get(url).await {
                Ok(payload) => {
                    debug!(
                        name,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Fetch complete"
                    );
                    return Some(payload);
                }
                Err(e) => {
                    warn!(name, url, attempt, max_attempts, "Request failed: {}", e);
                    if attempt < max_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        warn!(name, url, "Giving up after {} attempts", max_attempts);
        None
    }
}

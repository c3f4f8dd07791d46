//! Idempotent page-cache gate.
//!
//! Derived stats pages are expensive to build, so each page (identified by an
//! opaque index) is processed at most once across process restarts. The gate
//! keeps a record of done indexes under a single key in the host's
//! [`StateStore`] and holds no state of its own.
//!
//! At-most-once, not exactly-once: the record is read-modify-written without
//! locking, so concurrent callers racing on the same index must be serialized
//! externally.

use crate::state_store::StateStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Storage key holding the serialized done-flag record.
pub const CACHE_INFO_KEY: &str = "stats:cache-info";

/// The fixed set of listening time ranges a stats page can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeRange {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn all() -> [TimeRange; 3] {
        [
            TimeRange::ShortTerm,
            TimeRange::MediumTerm,
            TimeRange::LongTerm,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

/// Whether a refresh pass runs for the range the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPass {
    /// Inactive range, refreshed opportunistically.
    Background,
    /// The active range; the final pass of the unit of work.
    Foreground,
}

/// At-most-once guard over derived page work, keyed by an opaque index.
pub struct PageCacheGate {
    store: Arc<dyn StateStore>,
}

impl PageCacheGate {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Run the refresh callback for `index` unless it is already marked done.
    ///
    /// When the index is not yet done: outside library mode the callback runs
    /// once per inactive time range as a [`RefreshPass::Background`] pass,
    /// then always once for `active` as the [`RefreshPass::Foreground`] pass;
    /// the index is then marked done and the record persisted. When the index
    /// is already done the call is a complete no-op.
    ///
    /// An absent record is treated as empty, so first-run processing happens
    /// and the record is created on persist. A store read error skips the
    /// call entirely (prior state is unknown, and skipping preserves the
    /// at-most-once intent).
    pub fn ensure_processed<F>(
        &self,
        index: &str,
        active: TimeRange,
        library_mode: bool,
        mut callback: F,
    ) where
        F: FnMut(TimeRange, RefreshPass),
    {
        let mut record = match self.store.get_state(CACHE_INFO_KEY) {
            Ok(Some(raw)) => parse_record(&raw),
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!("Failed to read page cache record, skipping: {}", e);
                return;
            }
        };

        if record.get(index).copied().unwrap_or(false) {
            return;
        }

        if !library_mode {
            for range in TimeRange::all() {
                if range != active {
                    callback(range, RefreshPass::Background);
                }
            }
        }
        callback(active, RefreshPass::Foreground);

        record.insert(index.to_string(), true);
        match serde_json::to_string(&record) {
            Ok(raw) => {
                if let Err(e) = self.store.set_state(CACHE_INFO_KEY, &raw) {
                    warn!("Failed to persist page cache record: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize page cache record: {}", e),
        }
    }
}

fn parse_record(raw: &str) -> HashMap<String, bool> {
    match serde_json::from_str(raw) {
        Ok(record) => record,
        Err(e) => {
            warn!("Malformed page cache record, starting fresh: {}", e);
            HashMap::new()
        }
    }
}

//! Engine types
//!
//! Configuration, statistics and the per-forest report of a sync.

use crate::error::Error;
use crate::request::DEFAULT_PER_PAGE;
use std::collections::BTreeMap;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api3.getresponse360.pl/v3";

/// Configuration for sync operation
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// API root every stream path is appended to
    pub base_url: String,
    /// Page size sent as `perPage`
    pub per_page: u32,
    /// Fail when a page after the first carries no pagination headers
    pub strict_pagination: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            strict_pagination: false,
        }
    }
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set page size
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set strict pagination mode
    #[must_use]
    pub fn with_strict_pagination(mut self, strict: bool) -> Self {
        self.strict_pagination = strict;
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncStats {
    /// Records handed to the sink, per stream
    pub records: BTreeMap<String, usize>,
    /// Records dropped by post-processing
    pub records_skipped: usize,
    /// HTTP requests issued
    pub requests: usize,
    /// Pages successfully parsed
    pub pages_fetched: usize,
    /// Forests completed without error
    pub forests_synced: usize,
    /// Forests that failed
    pub errors: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one emitted record
    pub fn add_record(&mut self, stream: &str) {
        *self.records.entry(stream.to_string()).or_default() += 1;
    }

    /// Total records emitted across streams
    pub fn records_synced(&self) -> usize {
        self.records.values().sum()
    }

    /// Records emitted for one stream
    pub fn records_for(&self, stream: &str) -> usize {
        self.records.get(stream).copied().unwrap_or(0)
    }

    pub fn add_skipped(&mut self) {
        self.records_skipped += 1;
    }

    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    pub fn add_forest(&mut self) {
        self.forests_synced += 1;
    }

    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Outcome of a sync over several independent forests
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Roots whose forest completed
    pub completed: Vec<String>,
    /// Roots whose forest failed, with the error that stopped it
    pub failed: Vec<(String, Error)>,
}

impl SyncReport {
    /// True when no forest failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

//! Single-slot cache of the last successful output.
//!
//! The entry is only consulted when fetching fails. Its age decides whether it
//! is shown as is, marked as stale, or dropped.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Duration, Utc};
use directories::BaseDirs;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::{CacheEntry, Output};

/// Prefixed to the text of cached output that is no longer fresh.
pub const STALE_GLYPH: &str = "⏳";

const FRESH_HOURS: i64 = 2;
const AGING_HOURS: i64 = 6;
const MAX_AGE_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Up to 2h old, shown unchanged.
    Fresh,
    /// Up to 6h old, text gets the stale glyph.
    Aging,
    /// Up to 24h old, text and tooltip are both marked.
    Stale,
    /// Older than 24h, treated as missing.
    Expired,
}

impl Freshness {
    /// Entries from the future (clock skew) count as fresh.
    pub fn classify(age: Duration) -> Self {
        if age <= Duration::hours(FRESH_HOURS) {
            Freshness::Fresh
        } else if age <= Duration::hours(AGING_HOURS) {
            Freshness::Aging
        } else if age <= Duration::hours(MAX_AGE_HOURS) {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }
}

impl CacheEntry {
    pub fn new(data: Output, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, data }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.timestamp)
    }

    /// The cached output adjusted for its age at `now`, or `None` once expired.
    pub fn aged(&self, now: DateTime<Utc>) -> Option<Output> {
        let age = self.age(now);
        let mut output = self.data.clone();

        match Freshness::classify(age) {
            Freshness::Fresh => {}
            Freshness::Aging => {
                output.text = format!("{STALE_GLYPH} {}", output.text);
            }
            Freshness::Stale => {
                output.text = format!("{STALE_GLYPH} {}", output.text);
                output.tooltip = format!(
                    "⚠️ Cached data is {} hours old\n{}",
                    age.num_hours(),
                    output.tooltip
                );
            }
            Freshness::Expired => return None,
        }

        Some(output)
    }
}

#[derive(Debug, Clone)]
pub struct Cache {
    path: PathBuf,
}

impl Cache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path to the cache file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = BaseDirs::new()
            .ok_or_else(|| anyhow!("Could not determine platform cache directory"))?;

        Ok(dirs.cache_dir().join("waybar-weather").join("weather.json"))
    }

    /// Replace the cached entry with `output`, stamped `now`.
    pub fn store(&self, output: &Output, now: DateTime<Utc>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create cache directory: {}", parent.display())
            })?;
        }

        let entry = CacheEntry::new(output.clone(), now);
        let json = serde_json::to_string(&entry).context("Failed to serialize cache entry")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))
    }

    /// The cached entry, or `None` if it is missing or unreadable.
    pub fn load(&self) -> Option<CacheEntry> {
        match self.read() {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("no usable cache: {err:#}");
                None
            }
        }
    }

    fn read(&self) -> Result<CacheEntry> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", self.path.display()))
    }
}

//! Input snapshot types.
//!
//! The scraper writes one `state.json` per run: a map of brand slug →
//! product URL-key → observed record. The pipeline treats this file as a
//! read-only snapshot and never writes it back.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// One product observation from a brand's sitemap or product API.
///
/// Only `url` and `first_seen` are guaranteed by the feed. Everything else
/// is best-effort classification from the scraper and may be absent or
/// empty; downstream normalization applies the documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Canonical product URL, unique within a brand.
    pub url: String,
    /// When the scraper first observed this URL.
    pub first_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Raw free-text color name, e.g. `"Heather Midnight"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Coarse color bucket, e.g. `"black"` or `"heather"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_family: Option<String>,
    /// Style name shared by colorway variants, e.g. `"Sunday Performance Jogger"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
}

/// A full scraper state snapshot, keyed by brand slug.
///
/// `BTreeMap` on both levels: traversal order is part of the pipeline's
/// determinism contract (re-running on the same snapshot must reproduce
/// the output document byte for byte, timestamp aside).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub sitemap_products: BTreeMap<String, BTreeMap<String, ProductRecord>>,
}

impl StateSnapshot {
    /// Total record count across all brands, before any filtering.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sitemap_products.values().map(BTreeMap::len).sum()
    }
}

/// Load and parse a state snapshot from disk.
///
/// # Errors
///
/// Returns [`StateError`] if the file cannot be read or does not parse
/// into the expected shape. Malformed input is a fatal precondition
/// failure, not something the pipeline recovers from.
pub fn load_state(path: &Path) -> Result<StateSnapshot, StateError> {
    let content = std::fs::read_to_string(path).map_err(|e| StateError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let snapshot: StateSnapshot = serde_json::from_str(&content)?;
    Ok(snapshot)
}

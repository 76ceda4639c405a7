//! Record normalization: gift-card filtering and sentinel defaults.
//!
//! Every downstream stage consumes the output of this module; raw records
//! never leak past it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use gearlens_core::{ProductRecord, StateSnapshot};

/// Sentinel for records the scraper could not classify.
pub const DEFAULT_CATEGORY: &str = "other";
/// Sentinel gender for records with no gendered classification.
pub const DEFAULT_GENDER: &str = "unisex";

/// A product record after filtering and defaulting.
///
/// `category`, `subcategory`, and `gender` are always present (defaulted
/// when the feed omits them). `color_family` and `product_name` stay
/// optional: records without them are simply excluded from color-depth
/// and per-style computations.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub url: String,
    pub first_seen: DateTime<Utc>,
    pub gender: String,
    pub category: String,
    pub subcategory: String,
    pub color_family: Option<String>,
    pub product_name: Option<String>,
}

/// Returns `true` for gift-card URLs, which are catalog noise.
fn is_gift_card(url: &str) -> bool {
    let url = url.to_lowercase();
    (url.contains("gift") && url.contains("card")) || url.contains("giftcard")
}

/// Empty strings from the feed are treated the same as absent fields.
fn field_or(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

fn optional_field(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(ToString::to_string)
}

fn normalize_record(record: &ProductRecord) -> NormalizedRecord {
    NormalizedRecord {
        url: record.url.clone(),
        first_seen: record.first_seen,
        gender: field_or(record.gender.as_deref(), DEFAULT_GENDER),
        category: field_or(record.category.as_deref(), DEFAULT_CATEGORY),
        subcategory: field_or(record.subcategory.as_deref(), DEFAULT_CATEGORY),
        color_family: optional_field(record.color_family.as_deref()),
        product_name: optional_field(record.product_name.as_deref()),
    }
}

/// Normalize a full snapshot: per brand, drop gift cards and apply the
/// documented defaults. Record order within a brand follows the snapshot's
/// product-id key order, which keeps every later traversal deterministic.
#[must_use]
pub fn normalize_snapshot(snapshot: &StateSnapshot) -> BTreeMap<String, Vec<NormalizedRecord>> {
    snapshot
        .sitemap_products
        .iter()
        .map(|(slug, products)| {
            let records: Vec<NormalizedRecord> = products
                .values()
                .filter(|record| {
                    let keep = !is_gift_card(&record.url);
                    if !keep {
                        tracing::debug!(brand = %slug, url = %record.url, "dropping gift card record");
                    }
                    keep
                })
                .map(normalize_record)
                .collect();
            (slug.clone(), records)
        })
        .collect()
}

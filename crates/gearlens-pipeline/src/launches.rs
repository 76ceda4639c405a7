//! Launch detection from `first_seen` dates.
//!
//! A brand's earliest tracked date is its initial bulk load, not a launch
//! day: it is excluded from the recent-launch feed but still counted in the
//! velocity matrix, which tracks every day.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use gearlens_core::BrandDirectory;
use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedRecord;

/// The recent-launch feed spans at most this many distinct dates.
pub const RECENT_DATE_WINDOW: usize = 14;

/// Sample products carried per launch entry.
pub const SAMPLE_PRODUCT_CAP: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchProduct {
    pub name: String,
    pub url: String,
    pub category: String,
    pub gender: String,
}

/// Products one brand put live on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchEntry {
    pub date: NaiveDate,
    pub brand: String,
    pub brand_slug: String,
    pub count: u32,
    /// Up to [`SAMPLE_PRODUCT_CAP`] samples in record-iteration order;
    /// which ones make the cut is implementation-defined.
    pub products: Vec<LaunchProduct>,
}

/// Output of the launch extraction stage.
#[derive(Debug, Clone, Default)]
pub struct LaunchData {
    pub recent_launches: Vec<LaunchEntry>,
    /// brand slug → date → count, every date included (initial load too).
    pub launch_velocity: BTreeMap<String, BTreeMap<NaiveDate, u32>>,
}

/// Display name for a sample product: the style name when present, else
/// the URL path segment after `/products/` with any query string stripped.
fn sample_name(record: &NormalizedRecord) -> String {
    if let Some(name) = record.product_name.as_deref() {
        return name.to_string();
    }
    record
        .url
        .split("/products/")
        .nth(1)
        .and_then(|tail| tail.split('?').next())
        .filter(|tail| !tail.is_empty())
        .map_or_else(|| "Unknown".to_string(), ToString::to_string)
}

fn sample_product(record: &NormalizedRecord) -> LaunchProduct {
    LaunchProduct {
        name: sample_name(record),
        url: record.url.clone(),
        category: record.category.clone(),
        gender: record.gender.clone(),
    }
}

/// Bucket records by launch date and build the velocity matrix.
///
/// Recent launches keep the [`RECENT_DATE_WINDOW`] most recent distinct
/// dates across all brands, ordered by date descending, then count
/// descending, then brand slug as the final deterministic tie-break.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // per-day launch counts are far below u32::MAX
pub fn extract_launches(
    records_by_brand: &BTreeMap<String, Vec<NormalizedRecord>>,
    directory: &BrandDirectory,
) -> LaunchData {
    let mut launch_velocity: BTreeMap<String, BTreeMap<NaiveDate, u32>> = BTreeMap::new();
    // date → brand slug → records launched that day
    let mut by_date_brand: BTreeMap<NaiveDate, BTreeMap<&str, Vec<&NormalizedRecord>>> =
        BTreeMap::new();

    for (slug, records) in records_by_brand {
        let velocity = launch_velocity.entry(slug.clone()).or_default();
        let initial_load = records.iter().map(|r| r.first_seen.date_naive()).min();

        for record in records {
            let date = record.first_seen.date_naive();
            *velocity.entry(date).or_insert(0) += 1;

            // The bulk-import day is not a launch day.
            if Some(date) == initial_load {
                continue;
            }

            by_date_brand
                .entry(date)
                .or_default()
                .entry(slug.as_str())
                .or_default()
                .push(record);
        }
    }

    let recent_dates: Vec<NaiveDate> = by_date_brand
        .keys()
        .rev()
        .take(RECENT_DATE_WINDOW)
        .copied()
        .collect();

    let mut recent_launches: Vec<LaunchEntry> = Vec::new();
    for date in recent_dates {
        for (slug, records) in &by_date_brand[&date] {
            recent_launches.push(LaunchEntry {
                date,
                brand: directory.display_name(slug).to_string(),
                brand_slug: (*slug).to_string(),
                count: records.len() as u32,
                products: records
                    .iter()
                    .take(SAMPLE_PRODUCT_CAP)
                    .map(|r| sample_product(r))
                    .collect(),
            });
        }
    }

    recent_launches.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.brand_slug.cmp(&b.brand_slug))
    });

    LaunchData {
        recent_launches,
        launch_velocity,
    }
}

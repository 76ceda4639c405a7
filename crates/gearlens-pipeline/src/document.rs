//! Dashboard document assembly.
//!
//! Runs every stage in order and composes the one output document the
//! presentation layer consumes. The generation timestamp is injected by
//! the caller so the pipeline itself stays a pure function of its inputs.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use gearlens_core::{BrandDirectory, StateSnapshot, Thresholds};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_brands, BrandStats, Totals};
use crate::insights::{generate_insights, Insight, InsightContext};
use crate::launches::{extract_launches, LaunchEntry};
use crate::mix::{category_mix, color_mix, CategoryMixRow, ColorMixRow};
use crate::normalize::normalize_snapshot;
use crate::scorecard::{generate_scorecard, Scorecard};

/// The single output document of a pipeline run.
///
/// Field names are the presentation layer's contract; the camelCase keys
/// match what the dashboard's data loader expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDocument {
    pub brands: BTreeMap<String, BrandStats>,
    pub totals: Totals,
    pub recent_launches: Vec<LaunchEntry>,
    /// brand slug → date → count, all dates including each brand's
    /// initial load.
    pub launch_velocity: BTreeMap<String, BTreeMap<NaiveDate, u32>>,
    pub by_category: BTreeMap<String, BTreeMap<String, u32>>,
    pub by_subcategory: BTreeMap<String, BTreeMap<String, u32>>,
    pub by_color: BTreeMap<String, BTreeMap<String, u32>>,
    pub category_mix: Vec<CategoryMixRow>,
    pub color_mix: Vec<ColorMixRow>,
    pub insights: Vec<Insight>,
    pub scorecard: Scorecard,
    #[serde(rename = "generated_at")]
    pub generated_at: DateTime<Utc>,
}

/// Run the full prepare-data pipeline over one snapshot.
///
/// Stages run strictly left to right: normalize → aggregate → mix →
/// launches → insights → scorecard. Re-running on an identical snapshot
/// reproduces the document exactly, `generated_at` aside.
#[must_use]
pub fn build_dashboard(
    snapshot: &StateSnapshot,
    directory: &BrandDirectory,
    thresholds: &Thresholds,
    generated_at: DateTime<Utc>,
) -> DashboardDocument {
    let normalized = normalize_snapshot(snapshot);
    let aggregates = aggregate_brands(&normalized, directory);
    let launches = extract_launches(&normalized, directory);

    let category_mix = category_mix(&aggregates.brands);
    let color_mix = color_mix(&aggregates.brands);

    let ctx = InsightContext {
        brands: &aggregates.brands,
        by_subcategory: &aggregates.by_subcategory,
        total_products: aggregates.totals.products,
        directory,
        thresholds,
    };
    let insights = generate_insights(&ctx);

    let scorecard = generate_scorecard(
        &aggregates.brands,
        &aggregates.by_subcategory,
        directory,
        thresholds,
    );

    tracing::info!(
        products = aggregates.totals.products,
        brands = aggregates.totals.brands,
        launches = launches.recent_launches.len(),
        insights = insights.len(),
        "dashboard document assembled"
    );

    DashboardDocument {
        brands: aggregates.brands,
        totals: aggregates.totals,
        recent_launches: launches.recent_launches,
        launch_velocity: launches.launch_velocity,
        by_category: aggregates.by_category,
        by_subcategory: aggregates.by_subcategory,
        by_color: aggregates.by_color,
        category_mix,
        color_mix,
        insights,
        scorecard,
        generated_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use gearlens_core::ProductRecord;

    use super::*;

    fn make_record(url: &str, category: &str, day: u32) -> ProductRecord {
        ProductRecord {
            url: url.to_string(),
            first_seen: Utc.with_ymd_and_hms(2025, 6, day, 9, 0, 0).unwrap(),
            gender: Some("mens".to_string()),
            category: Some(category.to_string()),
            subcategory: Some("joggers".to_string()),
            color: None,
            color_family: Some("black".to_string()),
            product_name: Some(format!("Style {url}")),
        }
    }

    fn snapshot() -> StateSnapshot {
        let mut sitemap_products = BTreeMap::new();
        for (brand, urls) in [
            ("vuori", vec!["v1", "v2", "v3"]),
            ("lululemon", vec!["l1", "l2"]),
        ] {
            let mut products = BTreeMap::new();
            for (i, url) in urls.iter().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                let day = 1 + i as u32;
                products.insert(
                    (*url).to_string(),
                    make_record(url, "bottoms", day),
                );
            }
            sitemap_products.insert(brand.to_string(), products);
        }
        StateSnapshot { sitemap_products }
    }

    fn directory() -> BrandDirectory {
        BrandDirectory::new(
            "vuori",
            &["lululemon"],
            &[("vuori", "Vuori"), ("lululemon", "Lululemon")],
        )
    }

    #[test]
    fn document_carries_every_section() {
        let generated_at = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let doc = build_dashboard(
            &snapshot(),
            &directory(),
            &Thresholds::default(),
            generated_at,
        );

        assert_eq!(doc.totals.products, 5);
        assert_eq!(doc.totals.brands, 2);
        assert_eq!(doc.brands["vuori"].total, 3);
        assert!(!doc.category_mix.is_empty());
        assert!(!doc.insights.is_empty());
        assert_eq!(doc.generated_at, generated_at);
    }

    #[test]
    fn serialized_document_uses_contract_keys() {
        let doc = build_dashboard(
            &snapshot(),
            &directory(),
            &Thresholds::default(),
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
        );
        let json = serde_json::to_value(&doc).unwrap();

        for key in [
            "brands",
            "totals",
            "recentLaunches",
            "launchVelocity",
            "byCategory",
            "bySubcategory",
            "byColor",
            "categoryMix",
            "colorMix",
            "insights",
            "scorecard",
            "generated_at",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn velocity_dates_serialize_as_iso_days() {
        let doc = build_dashboard(
            &snapshot(),
            &directory(),
            &Thresholds::default(),
            Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap(),
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["launchVelocity"]["vuori"].get("2025-06-01").is_some());
    }
}

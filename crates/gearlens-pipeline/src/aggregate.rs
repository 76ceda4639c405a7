//! Per-brand aggregation: dimension counters, cross-tabs, and color-depth
//! metrics.

use std::collections::{BTreeMap, BTreeSet};

use gearlens_core::BrandDirectory;
use serde::{Deserialize, Serialize};

use crate::normalize::NormalizedRecord;
use crate::rounding::{pct1, round1};

/// Aggregate statistics for one brand.
///
/// Invariant: `categories`, `subcategories`, and `genders` each sum to
/// `total` (every normalized record lands in exactly one bucket per
/// dimension). `colors` sums to the number of records that carried a
/// color family, which is ≤ `total`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandStats {
    pub name: String,
    pub slug: String,
    pub total: u32,
    pub categories: BTreeMap<String, u32>,
    pub subcategories: BTreeMap<String, u32>,
    pub genders: BTreeMap<String, u32>,
    pub colors: BTreeMap<String, u32>,
    /// Share of records carrying a color family, in percent, one decimal.
    pub color_coverage: f64,
    /// Mean distinct color families per style, one decimal. `0.0` when the
    /// brand has no styles with color data.
    pub avg_colors_per_style: f64,
    /// Distinct `product_name` values with at least one color family.
    pub unique_styles: u32,
}

impl BrandStats {
    #[must_use]
    pub fn category_count(&self, category: &str) -> u32 {
        self.categories.get(category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn subcategory_count(&self, subcategory: &str) -> u32 {
        self.subcategories.get(subcategory).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn gender_count(&self, gender: &str) -> u32 {
        self.genders.get(gender).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn color_count(&self, family: &str) -> u32 {
        self.colors.get(family).copied().unwrap_or(0)
    }

    /// Combined count across a group of color families (earth tones,
    /// neutrals).
    #[must_use]
    pub fn color_group_count(&self, families: &[&str]) -> u32 {
        families.iter().map(|f| self.color_count(f)).sum()
    }
}

/// Aggregate scalar counts across the whole snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Totals {
    pub products: u32,
    pub brands: u32,
    pub categories: u32,
    pub subcategories: u32,
}

/// Everything the aggregation stage produces in one pass.
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub brands: BTreeMap<String, BrandStats>,
    /// category → brand slug → count
    pub by_category: BTreeMap<String, BTreeMap<String, u32>>,
    /// subcategory → brand slug → count
    pub by_subcategory: BTreeMap<String, BTreeMap<String, u32>>,
    /// color family → brand slug → count
    pub by_color: BTreeMap<String, BTreeMap<String, u32>>,
    pub totals: Totals,
}

/// Build per-brand stats and cross-tabs from normalized records.
///
/// One pass per brand; the per-style color-set map exists only to derive
/// `avg_colors_per_style` and is discarded afterwards.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // collection sizes are far below u32::MAX
pub fn aggregate_brands(
    records_by_brand: &BTreeMap<String, Vec<NormalizedRecord>>,
    directory: &BrandDirectory,
) -> Aggregates {
    let mut brands = BTreeMap::new();
    let mut by_category: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    let mut by_subcategory: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    let mut by_color: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
    let mut all_categories: BTreeSet<&str> = BTreeSet::new();
    let mut all_subcategories: BTreeSet<&str> = BTreeSet::new();

    for (slug, records) in records_by_brand {
        let mut categories: BTreeMap<String, u32> = BTreeMap::new();
        let mut subcategories: BTreeMap<String, u32> = BTreeMap::new();
        let mut genders: BTreeMap<String, u32> = BTreeMap::new();
        let mut colors: BTreeMap<String, u32> = BTreeMap::new();
        let mut style_colors: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut with_color: u32 = 0;

        for record in records {
            *categories.entry(record.category.clone()).or_insert(0) += 1;
            *subcategories.entry(record.subcategory.clone()).or_insert(0) += 1;
            *genders.entry(record.gender.clone()).or_insert(0) += 1;

            all_categories.insert(record.category.as_str());
            all_subcategories.insert(record.subcategory.as_str());

            *by_category
                .entry(record.category.clone())
                .or_default()
                .entry(slug.clone())
                .or_insert(0) += 1;
            *by_subcategory
                .entry(record.subcategory.clone())
                .or_default()
                .entry(slug.clone())
                .or_insert(0) += 1;

            if let Some(family) = record.color_family.as_deref() {
                with_color += 1;
                *colors.entry(family.to_string()).or_insert(0) += 1;
                *by_color
                    .entry(family.to_string())
                    .or_default()
                    .entry(slug.clone())
                    .or_insert(0) += 1;

                if let Some(style) = record.product_name.as_deref() {
                    style_colors.entry(style).or_default().insert(family);
                }
            }
        }

        let total = records.len() as u32;
        let unique_styles = style_colors.len() as u32;
        let color_slots: u32 = style_colors.values().map(|set| set.len() as u32).sum();

        let avg_colors_per_style = if unique_styles == 0 {
            0.0
        } else {
            round1(f64::from(color_slots) / f64::from(unique_styles))
        };

        brands.insert(
            slug.clone(),
            BrandStats {
                name: directory.display_name(slug).to_string(),
                slug: slug.clone(),
                total,
                categories,
                subcategories,
                genders,
                colors,
                color_coverage: pct1(with_color, total),
                avg_colors_per_style,
                unique_styles,
            },
        );
    }

    let totals = Totals {
        products: brands.values().map(|b| b.total).sum(),
        brands: brands.len() as u32,
        categories: all_categories.len() as u32,
        subcategories: all_subcategories.len() as u32,
    };

    Aggregates {
        brands,
        by_category,
        by_subcategory,
        by_color,
        totals,
    }
}

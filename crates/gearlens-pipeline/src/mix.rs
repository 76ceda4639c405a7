//! Percentage-mix rows over the fixed category and color bucket lists.
//!
//! Rows are ordered by catalog size (largest brand first) and carry display
//! names, ready for the dashboard's stacked-bar tables. Brands with no
//! products are excluded entirely rather than emitting NaN rows.

use std::collections::BTreeMap;

use gearlens_core::COLOR_ORDER;
use serde::{Deserialize, Serialize};

use crate::aggregate::BrandStats;
use crate::rounding::pct1;

/// Category share of one brand's catalog, in percent, one decimal per
/// bucket. Field order matches [`gearlens_core::CATEGORY_ORDER`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryMixRow {
    pub brand: String,
    pub bottoms: f64,
    pub tops: f64,
    pub outerwear: f64,
    pub dresses: f64,
    pub sports_bras: f64,
    pub accessories: f64,
    pub other: f64,
}

/// Color-family share of one brand's catalog. Named buckets follow
/// [`COLOR_ORDER`]; `other` is the remainder of all color-carrying records
/// not in a named bucket, so the row keeps approximating 100% of colored
/// volume as the scraper's vocabulary evolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorMixRow {
    pub brand: String,
    pub black: f64,
    pub white: f64,
    pub gray: f64,
    pub navy: f64,
    pub blue: f64,
    pub green: f64,
    pub khaki: f64,
    pub brown: f64,
    pub purple: f64,
    pub pink: f64,
    pub orange: f64,
    pub red: f64,
    pub yellow: f64,
    pub other: f64,
}

/// Brands ordered largest-catalog-first, slug order on ties, zero-total
/// brands dropped.
fn ranked_brands(brands: &BTreeMap<String, BrandStats>) -> Vec<&BrandStats> {
    let mut ranked: Vec<&BrandStats> = brands.values().filter(|b| b.total > 0).collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.slug.cmp(&b.slug)));
    ranked
}

/// Category mix rows for every brand with at least one product.
#[must_use]
pub fn category_mix(brands: &BTreeMap<String, BrandStats>) -> Vec<CategoryMixRow> {
    ranked_brands(brands)
        .into_iter()
        .map(|stats| {
            let share = |category: &str| pct1(stats.category_count(category), stats.total);
            CategoryMixRow {
                brand: stats.name.clone(),
                bottoms: share("bottoms"),
                tops: share("tops"),
                outerwear: share("outerwear"),
                dresses: share("dresses"),
                sports_bras: share("sports_bras"),
                accessories: share("accessories"),
                other: share("other"),
            }
        })
        .collect()
}

/// Color mix rows for every brand with at least one product.
#[must_use]
pub fn color_mix(brands: &BTreeMap<String, BrandStats>) -> Vec<ColorMixRow> {
    ranked_brands(brands)
        .into_iter()
        .map(|stats| {
            let share = |family: &str| pct1(stats.color_count(family), stats.total);

            let named_total: u32 = COLOR_ORDER.iter().map(|f| stats.color_count(f)).sum();
            let all_colors: u32 = stats.colors.values().sum();
            let other = pct1(all_colors - named_total, stats.total);

            ColorMixRow {
                brand: stats.name.clone(),
                black: share("black"),
                white: share("white"),
                gray: share("gray"),
                navy: share("navy"),
                blue: share("blue"),
                green: share("green"),
                khaki: share("khaki"),
                brown: share("brown"),
                purple: share("purple"),
                pink: share("pink"),
                orange: share("orange"),
                red: share("red"),
                yellow: share("yellow"),
                other,
            }
        })
        .collect()
}

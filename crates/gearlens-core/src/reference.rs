//! Fixed reference data shared by the pipeline and its consumers.
//!
//! Bucket orders and family groupings are display contracts: the dashboard
//! renders mix tables in exactly this order, so changing them is a breaking
//! change for the presentation layer. Rule thresholds live in one struct so
//! the heuristics stay auditable in a single place.

/// Category buckets in display order. `other` is always last and absorbs
/// anything the scraper could not classify.
pub const CATEGORY_ORDER: &[&str] = &[
    "bottoms",
    "tops",
    "outerwear",
    "dresses",
    "sports_bras",
    "accessories",
    "other",
];

/// Named color-family buckets in display order. The color mix adds a
/// computed `other` bucket on top so rows keep summing to ~100% as the
/// scraper's color vocabulary grows.
pub const COLOR_ORDER: &[&str] = &[
    "black", "white", "gray", "navy", "blue", "green", "khaki", "brown", "purple", "pink",
    "orange", "red", "yellow",
];

/// Color families counted as earth tones.
pub const EARTH_FAMILIES: &[&str] = &["brown", "rust", "khaki", "green"];

/// Color families counted as neutrals.
pub const NEUTRAL_FAMILIES: &[&str] = &["black", "white", "gray", "navy"];

/// Subcategories compared row-by-row in head-to-head tables.
pub const HEAD_TO_HEAD_SUBCATS: &[&str] =
    &["joggers", "leggings", "shorts", "hoodies", "tanks", "tees"];

/// Numeric thresholds for the insight battery and scorecard rules.
///
/// All comparisons against these values are strict (`>`) unless a rule
/// documents otherwise; in particular a bottoms share of exactly
/// `bottoms_trend_pct` does not trigger the trend rule.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// A brand leads a bucket when its count indexes above this value
    /// against the cross-brand mean (index 100 = at the mean).
    pub leader_index: f64,
    /// Minimum collective competitor volume for a zero-presence
    /// subcategory to count as a gap.
    pub gap_competitor_floor: u32,
    /// Catalog share of bottoms, in percent, above which the bottoms
    /// concentration trend fires.
    pub bottoms_trend_pct: f64,
    /// Heather share must exceed this multiple of the competitor mean to
    /// count as a leading metric.
    pub heather_lead_ratio: f64,
    /// Minimum min/max gendered-count ratio to call a catalog balanced.
    pub balance_floor: f64,
    /// Both gendered counts must individually exceed this before the
    /// balance rule applies at all.
    pub gendered_floor: u32,
    /// Competitor catalog size over this multiple of the focus brand's
    /// raises a medium alert.
    pub alert_medium_ratio: f64,
    /// ...and over this multiple, a high alert.
    pub alert_high_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            leader_index: 120.0,
            gap_competitor_floor: 20,
            bottoms_trend_pct: 40.0,
            heather_lead_ratio: 1.5,
            balance_floor: 0.3,
            gendered_floor: 100,
            alert_medium_ratio: 1.5,
            alert_high_ratio: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_ends_with_other() {
        assert_eq!(CATEGORY_ORDER.last(), Some(&"other"));
    }

    #[test]
    fn color_order_has_no_other_bucket() {
        assert!(!COLOR_ORDER.contains(&"other"));
    }

    #[test]
    fn family_groups_are_subsets_of_known_vocabulary() {
        // rust is a valid scraper family even though it has no named mix bucket
        for family in NEUTRAL_FAMILIES {
            assert!(COLOR_ORDER.contains(family), "unknown neutral {family}");
        }
    }

    #[test]
    fn default_thresholds_match_documented_rules() {
        let t = Thresholds::default();
        assert_eq!(t.leader_index, 120.0);
        assert_eq!(t.gap_competitor_floor, 20);
        assert_eq!(t.bottoms_trend_pct, 40.0);
        assert_eq!(t.alert_high_ratio, 2.0);
    }
}

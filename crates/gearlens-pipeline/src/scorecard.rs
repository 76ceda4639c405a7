//! Focus-brand scorecard: leading/lagging metrics, catalog-size alerts,
//! and head-to-head tables against the configured rivals.
//!
//! Every competitor average excludes the focus brand from its denominator,
//! and every ratio guards a zero denominator to an empty result instead of
//! propagating NaN. A feed without the focus brand yields a fully empty
//! scorecard rather than failing the run.

use std::collections::BTreeMap;

use gearlens_core::{BrandDirectory, Thresholds, EARTH_FAMILIES, HEAD_TO_HEAD_SUBCATS};
use serde::{Deserialize, Serialize};

use crate::aggregate::BrandStats;
use crate::rounding::pct;

/// Caps applied to the scorecard lists. Head-to-head tables are uncapped;
/// their cardinality is fixed by [`HEAD_TO_HEAD_SUBCATS`].
pub const LEADING_CAP: usize = 5;
pub const LAGGING_CAP: usize = 4;
pub const ALERTS_CAP: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorecardItem {
    pub metric: String,
    pub value: String,
    pub comparison: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Focus,
    Competitor,
    Tie,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadToHeadRow {
    pub category: String,
    pub focus: u32,
    pub competitor: u32,
    pub winner: Winner,
}

/// One rival's full head-to-head table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadTable {
    pub rival: String,
    pub rival_slug: String,
    pub rows: Vec<HeadToHeadRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub leading: Vec<ScorecardItem>,
    pub lagging: Vec<ScorecardItem>,
    pub alerts: Vec<Alert>,
    pub head_to_head: Vec<HeadToHeadTable>,
}

/// `sports_bras` → `Sports Bras`, for lagging-item display.
fn title_case(subcategory: &str) -> String {
    subcategory
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or(String::new(), |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `joggers` → `Joggers`, for head-to-head rows.
fn capitalize(subcategory: &str) -> String {
    let mut chars = subcategory.chars();
    chars.next().map_or(String::new(), |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = values.len() as f64;
    values.iter().sum::<f64>() / len
}

fn three_way(focus: u32, competitor: u32) -> Winner {
    match focus.cmp(&competitor) {
        std::cmp::Ordering::Greater => Winner::Focus,
        std::cmp::Ordering::Less => Winner::Competitor,
        std::cmp::Ordering::Equal => Winner::Tie,
    }
}

/// Build the full scorecard for the configured focus brand.
#[must_use]
pub fn generate_scorecard(
    brands: &BTreeMap<String, BrandStats>,
    by_subcategory: &BTreeMap<String, BTreeMap<String, u32>>,
    directory: &BrandDirectory,
    thresholds: &Thresholds,
) -> Scorecard {
    let Some(focus) = brands.get(directory.focus()) else {
        return Scorecard::default();
    };

    let competitors: Vec<&BrandStats> = brands
        .values()
        .filter(|stats| stats.slug != focus.slug)
        .collect();

    let mut leading: Vec<ScorecardItem> = Vec::new();
    let mut lagging: Vec<ScorecardItem> = Vec::new();
    let mut alerts: Vec<Alert> = Vec::new();

    // Heather share against the competitor mean.
    let focus_heather = pct(focus.color_count("heather"), focus.total);
    let heather_pcts: Vec<f64> = competitors
        .iter()
        .filter(|stats| stats.total > 0)
        .map(|stats| pct(stats.color_count("heather"), stats.total))
        .collect();
    let heather_mean = mean(&heather_pcts);
    if focus_heather > heather_mean * thresholds.heather_lead_ratio {
        leading.push(ScorecardItem {
            metric: "Performance Fabrics (Heather)".to_string(),
            value: format!("{focus_heather:.0}% of products"),
            comparison: format!("Industry avg: {heather_mean:.0}%"),
        });
    }

    // Color depth: leading at or above the mean, lagging below it.
    let depths: Vec<f64> = competitors
        .iter()
        .filter(|stats| stats.unique_styles > 0)
        .map(|stats| stats.avg_colors_per_style)
        .collect();
    let depth_mean = mean(&depths);
    if focus.avg_colors_per_style >= depth_mean {
        leading.push(ScorecardItem {
            metric: "Color Depth".to_string(),
            value: format!("{:.1} colors/style", focus.avg_colors_per_style),
            comparison: format!(
                "+{:.1} vs industry avg",
                focus.avg_colors_per_style - depth_mean
            ),
        });
    } else {
        let depth_max = depths.iter().copied().fold(0.0_f64, f64::max);
        let depth_leader = competitors
            .iter()
            .find(|stats| stats.avg_colors_per_style == depth_max);
        lagging.push(ScorecardItem {
            metric: "Color Depth".to_string(),
            value: format!("{:.1} colors/style", focus.avg_colors_per_style),
            comparison: format!(
                "{} has {depth_max:.1}",
                depth_leader.map_or("Leader", |stats| stats.name.as_str()),
            ),
        });
    }

    // Earth tones.
    let focus_earth = pct(focus.color_group_count(EARTH_FAMILIES), focus.total);
    let earth_pcts: Vec<f64> = competitors
        .iter()
        .filter(|stats| stats.total > 0)
        .map(|stats| pct(stats.color_group_count(EARTH_FAMILIES), stats.total))
        .collect();
    let earth_mean = mean(&earth_pcts);
    if focus_earth > earth_mean {
        leading.push(ScorecardItem {
            metric: "Earth Tone Palette".to_string(),
            value: format!("{focus_earth:.0}% earth tones"),
            comparison: format!("Industry avg: {earth_mean:.0}%"),
        });
    }

    // Gender balance, only meaningful once both gendered counts clear the
    // floor.
    let womens = focus.gender_count("womens");
    let mens = focus.gender_count("mens");
    if womens > thresholds.gendered_floor && mens > thresholds.gendered_floor {
        let balance = f64::from(womens.min(mens)) / f64::from(womens.max(mens));

        let most_balanced = competitors.iter().all(|stats| {
            let w = stats.gender_count("womens");
            let m = stats.gender_count("mens");
            if w > thresholds.gendered_floor && m > thresholds.gendered_floor {
                f64::from(w.min(m)) / f64::from(w.max(m)) <= balance
            } else {
                true
            }
        });

        if balance >= thresholds.balance_floor {
            let gendered = womens + mens;
            leading.push(ScorecardItem {
                metric: "Gender Balance".to_string(),
                value: format!(
                    "{:.0}% W / {:.0}% M",
                    pct(womens, gendered).round(),
                    pct(mens, gendered).round(),
                ),
                comparison: if most_balanced {
                    "Most balanced lifestyle brand".to_string()
                } else {
                    "Strong balance".to_string()
                },
            });
        }
    }

    // Zero-presence subcategories where competitors collectively clear the
    // gap floor.
    for (subcategory, counts) in by_subcategory {
        if subcategory == "other" {
            continue;
        }
        let ours = counts.get(&focus.slug).copied().unwrap_or(0);
        let competitor_volume: u32 = counts
            .iter()
            .filter(|(slug, _)| *slug != &focus.slug)
            .map(|(_, count)| count)
            .sum();
        if ours == 0 && competitor_volume >= thresholds.gap_competitor_floor {
            lagging.push(ScorecardItem {
                metric: title_case(subcategory),
                value: "0 products".to_string(),
                comparison: format!("Competitors have {competitor_volume} products"),
            });
        }
    }

    // Catalog-size alerts. A zero-size focus catalog has no meaningful
    // ratio, so no alerts are raised for it.
    if focus.total > 0 {
        for stats in &competitors {
            let ratio = f64::from(stats.total) / f64::from(focus.total);
            if ratio > thresholds.alert_medium_ratio {
                alerts.push(Alert {
                    severity: if ratio > thresholds.alert_high_ratio {
                        Severity::High
                    } else {
                        Severity::Medium
                    },
                    message: format!(
                        "{} has {:.0}x {}'s catalog size",
                        stats.name,
                        ratio.round(),
                        focus.name,
                    ),
                });
            }
        }
    }

    let head_to_head = directory
        .rivals()
        .iter()
        .filter_map(|slug| brands.get(slug))
        .map(|rival| head_to_head_table(focus, rival))
        .collect();

    leading.truncate(LEADING_CAP);
    lagging.truncate(LAGGING_CAP);
    alerts.truncate(ALERTS_CAP);

    Scorecard {
        leading,
        lagging,
        alerts,
        head_to_head,
    }
}

fn head_to_head_table(focus: &BrandStats, rival: &BrandStats) -> HeadToHeadTable {
    let mut rows: Vec<HeadToHeadRow> = HEAD_TO_HEAD_SUBCATS
        .iter()
        .map(|subcategory| {
            let ours = focus.subcategory_count(subcategory);
            let theirs = rival.subcategory_count(subcategory);
            HeadToHeadRow {
                category: capitalize(subcategory),
                focus: ours,
                competitor: theirs,
                winner: three_way(ours, theirs),
            }
        })
        .collect();

    for (label, gender) in [("Men's Products", "mens"), ("Women's Products", "womens")] {
        let ours = focus.gender_count(gender);
        let theirs = rival.gender_count(gender);
        rows.push(HeadToHeadRow {
            category: label.to_string(),
            focus: ours,
            competitor: theirs,
            winner: three_way(ours, theirs),
        });
    }

    HeadToHeadTable {
        rival: rival.name.clone(),
        rival_slug: rival.slug.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use gearlens_core::Thresholds;

    use super::*;

    fn make_stats(slug: &str, name: &str, total: u32) -> BrandStats {
        BrandStats {
            name: name.to_string(),
            slug: slug.to_string(),
            total,
            categories: BTreeMap::new(),
            subcategories: BTreeMap::new(),
            genders: BTreeMap::new(),
            colors: BTreeMap::new(),
            color_coverage: 0.0,
            avg_colors_per_style: 0.0,
            unique_styles: 0,
        }
    }

    fn directory() -> BrandDirectory {
        BrandDirectory::new(
            "vuori",
            &["lululemon", "alo"],
            &[
                ("vuori", "Vuori"),
                ("lululemon", "Lululemon"),
                ("alo", "Alo Yoga"),
                ("gymshark", "Gymshark"),
            ],
        )
    }

    fn run(
        brands: &BTreeMap<String, BrandStats>,
        by_subcategory: &BTreeMap<String, BTreeMap<String, u32>>,
    ) -> Scorecard {
        generate_scorecard(brands, by_subcategory, &directory(), &Thresholds::default())
    }

    #[test]
    fn missing_focus_brand_yields_empty_scorecard() {
        let mut brands = BTreeMap::new();
        brands.insert(
            "lululemon".to_string(),
            make_stats("lululemon", "Lululemon", 100),
        );
        let scorecard = run(&brands, &BTreeMap::new());
        assert!(scorecard.leading.is_empty());
        assert!(scorecard.lagging.is_empty());
        assert!(scorecard.alerts.is_empty());
        assert!(scorecard.head_to_head.is_empty());
    }

    #[test]
    fn heather_leads_above_ratio_of_mean() {
        let mut vuori = make_stats("vuori", "Vuori", 100);
        vuori.colors.insert("heather".to_string(), 30);
        let mut lulu = make_stats("lululemon", "Lululemon", 100);
        lulu.colors.insert("heather".to_string(), 10);

        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);
        brands.insert("lululemon".to_string(), lulu);

        let scorecard = run(&brands, &BTreeMap::new());
        assert!(scorecard
            .leading
            .iter()
            .any(|item| item.metric.contains("Heather")));
    }

    #[test]
    fn heather_not_leading_at_exactly_ratio() {
        // 15% vs 10% mean: 15 = 10 * 1.5, strict > means no lead.
        let mut vuori = make_stats("vuori", "Vuori", 100);
        vuori.colors.insert("heather".to_string(), 15);
        let mut lulu = make_stats("lululemon", "Lululemon", 100);
        lulu.colors.insert("heather".to_string(), 10);

        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);
        brands.insert("lululemon".to_string(), lulu);

        let scorecard = run(&brands, &BTreeMap::new());
        assert!(!scorecard
            .leading
            .iter()
            .any(|item| item.metric.contains("Heather")));
    }

    #[test]
    fn color_depth_above_mean_is_leading() {
        let mut vuori = make_stats("vuori", "Vuori", 100);
        vuori.avg_colors_per_style = 3.0;
        vuori.unique_styles = 10;
        let mut lulu = make_stats("lululemon", "Lululemon", 100);
        lulu.avg_colors_per_style = 2.0;
        lulu.unique_styles = 10;

        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);
        brands.insert("lululemon".to_string(), lulu);

        let scorecard = run(&brands, &BTreeMap::new());
        let item = scorecard
            .leading
            .iter()
            .find(|item| item.metric == "Color Depth")
            .expect("expected color depth leading");
        assert_eq!(item.value, "3.0 colors/style");
        assert_eq!(item.comparison, "+1.0 vs industry avg");
    }

    #[test]
    fn color_depth_below_mean_is_lagging_and_names_leader() {
        let mut vuori = make_stats("vuori", "Vuori", 100);
        vuori.avg_colors_per_style = 1.5;
        vuori.unique_styles = 10;
        let mut lulu = make_stats("lululemon", "Lululemon", 100);
        lulu.avg_colors_per_style = 4.0;
        lulu.unique_styles = 10;

        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);
        brands.insert("lululemon".to_string(), lulu);

        let scorecard = run(&brands, &BTreeMap::new());
        let item = scorecard
            .lagging
            .iter()
            .find(|item| item.metric == "Color Depth")
            .expect("expected color depth lagging");
        assert_eq!(item.comparison, "Lululemon has 4.0");
    }

    #[test]
    fn no_competitors_with_styles_defaults_depth_to_leading() {
        let mut vuori = make_stats("vuori", "Vuori", 100);
        vuori.avg_colors_per_style = 0.0;
        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);

        let scorecard = run(&brands, &BTreeMap::new());
        assert!(scorecard
            .leading
            .iter()
            .any(|item| item.metric == "Color Depth"));
    }

    #[test]
    fn gender_balance_needs_both_floors_cleared() {
        let mut vuori = make_stats("vuori", "Vuori", 300);
        vuori.genders.insert("womens".to_string(), 150);
        vuori.genders.insert("mens".to_string(), 100); // not > 100
        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);

        let scorecard = run(&brands, &BTreeMap::new());
        assert!(!scorecard
            .leading
            .iter()
            .any(|item| item.metric == "Gender Balance"));
    }

    #[test]
    fn gender_balance_most_balanced_when_no_competitor_beats_it() {
        let mut vuori = make_stats("vuori", "Vuori", 300);
        vuori.genders.insert("womens".to_string(), 150);
        vuori.genders.insert("mens".to_string(), 140);
        let mut lulu = make_stats("lululemon", "Lululemon", 500);
        lulu.genders.insert("womens".to_string(), 350);
        lulu.genders.insert("mens".to_string(), 120);

        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);
        brands.insert("lululemon".to_string(), lulu);

        let scorecard = run(&brands, &BTreeMap::new());
        let item = scorecard
            .leading
            .iter()
            .find(|item| item.metric == "Gender Balance")
            .expect("expected gender balance leading");
        assert_eq!(item.comparison, "Most balanced lifestyle brand");
    }

    #[test]
    fn subcategory_gap_becomes_lagging_item() {
        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), make_stats("vuori", "Vuori", 100));
        brands.insert(
            "lululemon".to_string(),
            make_stats("lululemon", "Lululemon", 100),
        );
        let mut by_subcategory = BTreeMap::new();
        let mut counts = BTreeMap::new();
        counts.insert("lululemon".to_string(), 25_u32);
        by_subcategory.insert("sports_bras".to_string(), counts);

        let scorecard = run(&brands, &by_subcategory);
        let item = scorecard
            .lagging
            .iter()
            .find(|item| item.metric == "Sports Bras")
            .expect("expected a sports bras gap");
        assert_eq!(item.value, "0 products");
        assert_eq!(item.comparison, "Competitors have 25 products");
    }

    #[test]
    fn alerts_scale_with_catalog_ratio() {
        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), make_stats("vuori", "Vuori", 100));
        brands.insert(
            "lululemon".to_string(),
            make_stats("lululemon", "Lululemon", 250),
        );
        brands.insert("alo".to_string(), make_stats("alo", "Alo Yoga", 160));
        brands.insert(
            "gymshark".to_string(),
            make_stats("gymshark", "Gymshark", 120),
        );

        let scorecard = run(&brands, &BTreeMap::new());
        assert_eq!(scorecard.alerts.len(), 2);
        let lulu_alert = scorecard
            .alerts
            .iter()
            .find(|alert| alert.message.starts_with("Lululemon"))
            .expect("expected a Lululemon alert");
        assert_eq!(lulu_alert.severity, Severity::High);
        let alo_alert = scorecard
            .alerts
            .iter()
            .find(|alert| alert.message.starts_with("Alo"))
            .expect("expected an Alo alert");
        assert_eq!(alo_alert.severity, Severity::Medium);
    }

    #[test]
    fn zero_total_focus_raises_no_alerts() {
        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), make_stats("vuori", "Vuori", 0));
        brands.insert(
            "lululemon".to_string(),
            make_stats("lululemon", "Lululemon", 500),
        );

        let scorecard = run(&brands, &BTreeMap::new());
        assert!(scorecard.alerts.is_empty());
    }

    #[test]
    fn lagging_capped_at_four() {
        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), make_stats("vuori", "Vuori", 100));
        brands.insert(
            "lululemon".to_string(),
            make_stats("lululemon", "Lululemon", 500),
        );
        let mut by_subcategory = BTreeMap::new();
        for subcategory in ["bras", "dresses", "leggings", "skirts", "tanks", "tees"] {
            let mut counts = BTreeMap::new();
            counts.insert("lululemon".to_string(), 30_u32);
            by_subcategory.insert(subcategory.to_string(), counts);
        }

        let scorecard = run(&brands, &by_subcategory);
        assert_eq!(scorecard.lagging.len(), LAGGING_CAP);
    }

    #[test]
    fn head_to_head_tables_for_each_present_rival() {
        let mut vuori = make_stats("vuori", "Vuori", 100);
        vuori.subcategories.insert("joggers".to_string(), 50);
        vuori.genders.insert("mens".to_string(), 60);
        let mut lulu = make_stats("lululemon", "Lululemon", 100);
        lulu.subcategories.insert("joggers".to_string(), 30);
        lulu.genders.insert("mens".to_string(), 60);

        let mut brands = BTreeMap::new();
        brands.insert("vuori".to_string(), vuori);
        brands.insert("lululemon".to_string(), lulu);

        let scorecard = run(&brands, &BTreeMap::new());
        // alo is configured but absent from the feed
        assert_eq!(scorecard.head_to_head.len(), 1);
        let table = &scorecard.head_to_head[0];
        assert_eq!(table.rival_slug, "lululemon");
        assert_eq!(table.rows.len(), HEAD_TO_HEAD_SUBCATS.len() + 2);

        let joggers = &table.rows[0];
        assert_eq!(joggers.category, "Joggers");
        assert_eq!(joggers.winner, Winner::Focus);

        let mens = table
            .rows
            .iter()
            .find(|row| row.category == "Men's Products")
            .expect("expected a men's row");
        assert_eq!(mens.winner, Winner::Tie);
    }

    #[test]
    fn winner_tie_on_exact_equality() {
        assert_eq!(three_way(5, 5), Winner::Tie);
        assert_eq!(three_way(6, 5), Winner::Focus);
        assert_eq!(three_way(4, 5), Winner::Competitor);
    }

    #[test]
    fn title_case_replaces_underscores() {
        assert_eq!(title_case("sports_bras"), "Sports Bras");
        assert_eq!(title_case("tees"), "Tees");
    }
}

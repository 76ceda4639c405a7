//! The heuristic insight battery.
//!
//! A fixed, ordered list of independent rules runs against a shared
//! read-only view of the aggregated data. Each rule emits zero or one
//! insight; the concatenated list is truncated to [`INSIGHT_CAP`]. There
//! is no randomness anywhere, so identical input yields an identical
//! ordered list.
//!
//! Rules that compare against the focus brand return nothing when the
//! focus brand is missing from the feed; rules that don't need it (the
//! bottoms-concentration trend) still run.

use std::collections::BTreeMap;

use gearlens_core::{BrandDirectory, Thresholds, EARTH_FAMILIES, NEUTRAL_FAMILIES};
use serde::{Deserialize, Serialize};

use crate::aggregate::BrandStats;
use crate::rounding::{pct, round1};

/// At most this many insights survive per run.
pub const INSIGHT_CAP: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Leader,
    Gap,
    Trend,
    Comparison,
}

/// One generated narrative insight. No persistent identity across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightType,
    pub metric: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Read-only aggregated data every rule evaluates against.
#[derive(Debug, Clone, Copy)]
pub struct InsightContext<'a> {
    pub brands: &'a BTreeMap<String, BrandStats>,
    pub by_subcategory: &'a BTreeMap<String, BTreeMap<String, u32>>,
    pub total_products: u32,
    pub directory: &'a BrandDirectory,
    pub thresholds: &'a Thresholds,
}

impl<'a> InsightContext<'a> {
    fn focus(&self) -> Option<&'a BrandStats> {
        self.brands.get(self.directory.focus())
    }

    /// First configured rival that is present in the feed.
    fn first_rival(&self) -> Option<&'a BrandStats> {
        self.directory
            .rivals()
            .iter()
            .find_map(|slug| self.brands.get(slug))
    }

    fn competitors(&self) -> impl Iterator<Item = &'a BrandStats> + '_ {
        let focus = self.directory.focus();
        self.brands
            .values()
            .filter(move |stats| stats.slug != focus)
    }

    /// Mean of a metric over competitor brands, skipping brands where the
    /// metric is undefined. Empty sets yield `0.0`, never NaN.
    fn competitor_mean(&self, metric: impl Fn(&BrandStats) -> Option<f64>) -> f64 {
        let values: Vec<f64> = self.competitors().filter_map(|stats| metric(stats)).collect();
        if values.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let len = values.len() as f64;
        values.iter().sum::<f64>() / len
    }
}

type Rule = fn(&InsightContext) -> Option<Insight>;

/// The battery, in evaluation order.
const RULES: &[Rule] = &[
    gender_balance,
    earth_tones,
    rival_joggers,
    leggings_gap,
    bottoms_focus,
    subcategory_gap,
    neutrals,
    mens_catalog,
    shorts_rank,
    outerwear_depth,
    market_landscape,
];

/// Run the battery and keep the first [`INSIGHT_CAP`] insights.
#[must_use]
pub fn generate_insights(ctx: &InsightContext) -> Vec<Insight> {
    RULES
        .iter()
        .filter_map(|rule| rule(ctx))
        .take(INSIGHT_CAP)
        .collect()
}

/// Focus gender split against the most women's-skewed and most
/// men's-skewed competitors.
fn gender_balance(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    if focus.total == 0 {
        return None;
    }

    let womens_pct = pct(focus.gender_count("womens"), focus.total).round();
    let mens_pct = pct(focus.gender_count("mens"), focus.total).round();

    let mut womens_skew: Option<(&BrandStats, f64)> = None;
    let mut mens_skew: Option<(&BrandStats, f64)> = None;
    for stats in ctx.competitors().filter(|s| s.total > 0) {
        let w = pct(stats.gender_count("womens"), stats.total);
        let m = pct(stats.gender_count("mens"), stats.total);
        if womens_skew.is_none_or(|(_, best)| w > best) {
            womens_skew = Some((stats, w));
        }
        if mens_skew.is_none_or(|(_, best)| m > best) {
            mens_skew = Some((stats, m));
        }
    }
    let (womens_brand, w) = womens_skew?;
    let (mens_brand, m) = mens_skew?;

    Some(Insight {
        kind: InsightType::Leader,
        metric: "gender_balance".to_string(),
        text: format!(
            "{} is uniquely balanced: {womens_pct:.0}% women's / {mens_pct:.0}% men's. {} skews {:.0}% women's, {} {:.0}% men's.",
            focus.name,
            womens_brand.name,
            w.round(),
            mens_brand.name,
            m.round(),
        ),
        brand: Some(focus.name.clone()),
        value: None,
    })
}

/// Focus earth-tone share versus the competitor average.
fn earth_tones(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    if focus.total == 0 {
        return None;
    }

    let focus_pct = pct(focus.color_group_count(EARTH_FAMILIES), focus.total).round();
    let industry_avg = ctx
        .competitor_mean(|stats| {
            (stats.total > 0).then(|| pct(stats.color_group_count(EARTH_FAMILIES), stats.total))
        })
        .round();
    let delta = focus_pct - industry_avg;
    let sign = if delta > 0.0 { "+" } else { "" };

    Some(Insight {
        kind: InsightType::Trend,
        metric: "earth_tones".to_string(),
        text: format!(
            "{}'s earth tone palette ({focus_pct:.0}%) runs {sign}{delta:.0} points against the competitor average of {industry_avg:.0}%.",
            focus.name,
        ),
        brand: Some(focus.name.clone()),
        value: Some(focus_pct),
    })
}

/// Jogger counts head to head against the first rival.
fn rival_joggers(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    let rival = ctx.first_rival()?;

    let ours = focus.subcategory_count("joggers");
    let theirs = rival.subcategory_count("joggers");
    let standing = if ours > theirs {
        format!("{} leads by {}.", focus.name, ours - theirs)
    } else if theirs > ours {
        format!("Gap of {} to close.", theirs - ours)
    } else {
        "Dead even.".to_string()
    };

    Some(Insight {
        kind: InsightType::Comparison,
        metric: format!("joggers_vs_{}", rival.slug),
        text: format!(
            "Jogger battle: {} ({ours}) vs {} ({theirs}). {standing}",
            focus.name, rival.name,
        ),
        brand: None,
        value: None,
    })
}

/// Emitted when the first rival out-carries the focus brand in leggings.
fn leggings_gap(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    let rival = ctx.first_rival()?;

    let ours = focus.subcategory_count("leggings");
    let theirs = rival.subcategory_count("leggings");
    if theirs <= ours {
        return None;
    }
    let delta = theirs - ours;

    Some(Insight {
        kind: InsightType::Gap,
        metric: "leggings".to_string(),
        text: format!(
            "Leggings opportunity: {} carries {theirs} vs {}'s {ours}. Gap of {delta} SKUs.",
            rival.name, focus.name,
        ),
        brand: Some(focus.name.clone()),
        value: Some(f64::from(delta)),
    })
}

/// The heaviest bottoms concentration across all brands, when it crosses
/// the trend threshold. Strictly greater than: exactly at the threshold
/// does not fire.
fn bottoms_focus(ctx: &InsightContext) -> Option<Insight> {
    let mut heaviest: Option<(&BrandStats, f64)> = None;
    for stats in ctx.brands.values().filter(|s| s.total > 0) {
        let share = pct(stats.category_count("bottoms"), stats.total);
        if heaviest.is_none_or(|(_, best)| share > best) {
            heaviest = Some((stats, share));
        }
    }
    let (brand, share) = heaviest?;
    if share <= ctx.thresholds.bottoms_trend_pct {
        return None;
    }

    Some(Insight {
        kind: InsightType::Trend,
        metric: "bottoms_focus".to_string(),
        text: format!(
            "{} concentrates {:.1}% of its catalog in bottoms, the heaviest bottoms focus tracked.",
            brand.name,
            round1(share),
        ),
        brand: Some(brand.name.clone()),
        value: Some(round1(share)),
    })
}

/// Largest zero-presence subcategory for the focus brand where
/// competitors collectively clear the gap floor.
fn subcategory_gap(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    let floor = ctx.thresholds.gap_competitor_floor;

    let mut widest: Option<(&str, u32)> = None;
    for (subcategory, counts) in ctx.by_subcategory {
        if subcategory == "other" {
            continue;
        }
        let ours = counts.get(&focus.slug).copied().unwrap_or(0);
        if ours != 0 {
            continue;
        }
        let competitor_volume: u32 = counts
            .iter()
            .filter(|(slug, _)| *slug != &focus.slug)
            .map(|(_, count)| count)
            .sum();
        if competitor_volume >= floor && widest.is_none_or(|(_, best)| competitor_volume > best) {
            widest = Some((subcategory, competitor_volume));
        }
    }
    let (subcategory, volume) = widest?;

    Some(Insight {
        kind: InsightType::Gap,
        metric: format!("{subcategory}_gap"),
        text: format!(
            "White space: {} has no {subcategory} while competitors hold {volume} products.",
            focus.name,
        ),
        brand: Some(focus.name.clone()),
        value: Some(f64::from(volume)),
    })
}

/// Neutral-family share of the focus palette.
fn neutrals(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    if focus.total == 0 {
        return None;
    }

    let share = pct(focus.color_group_count(NEUTRAL_FAMILIES), focus.total).round();

    Some(Insight {
        kind: InsightType::Trend,
        metric: "neutrals".to_string(),
        text: format!(
            "Neutrals (black/white/gray/navy) make up {share:.0}% of {}'s palette. Core basics that drive repeat purchases.",
            focus.name,
        ),
        brand: Some(focus.name.clone()),
        value: Some(share),
    })
}

/// Focus men's catalog indexed against the competitor mean.
fn mens_catalog(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    let ours = focus.gender_count("mens");
    let market_mean = ctx.competitor_mean(|stats| Some(f64::from(stats.gender_count("mens"))));
    if market_mean <= 0.0 {
        return None;
    }

    let index = f64::from(ours) / market_mean * 100.0;
    if index <= ctx.thresholds.leader_index {
        return None;
    }

    Some(Insight {
        kind: InsightType::Leader,
        metric: "mens_catalog".to_string(),
        text: format!(
            "{}'s men's catalog indexes {index:.0} against a market average of {market_mean:.0} products.",
            focus.name,
        ),
        brand: Some(focus.name.clone()),
        value: Some(f64::from(ours)),
    })
}

/// Focus brand placing top three by shorts count.
fn shorts_rank(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;

    let mut ranking: Vec<&BrandStats> = ctx.brands.values().collect();
    ranking.sort_by(|a, b| {
        b.subcategory_count("shorts")
            .cmp(&a.subcategory_count("shorts"))
            .then_with(|| a.slug.cmp(&b.slug))
    });
    let rank = ranking.iter().position(|stats| stats.slug == focus.slug)? + 1;
    if rank > 3 {
        return None;
    }

    let ours = focus.subcategory_count("shorts");
    let standing = if rank == 1 {
        "Category leader.".to_string()
    } else {
        format!(
            "Behind {} ({}).",
            ranking[0].name,
            ranking[0].subcategory_count("shorts"),
        )
    };

    Some(Insight {
        kind: InsightType::Leader,
        metric: "shorts".to_string(),
        text: format!(
            "{} ranks #{rank} in shorts with {ours} products. {standing}",
            focus.name,
        ),
        brand: Some(focus.name.clone()),
        value: Some(f64::from(ours)),
    })
}

/// Outerwear depth, with the first rival as the reference point when
/// available.
fn outerwear_depth(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    let ours = focus.category_count("outerwear");

    let reference = ctx.first_rival().map_or(String::new(), |rival| {
        format!(" vs {}'s {}", rival.name, rival.category_count("outerwear"))
    });

    Some(Insight {
        kind: InsightType::Comparison,
        metric: "outerwear".to_string(),
        text: format!(
            "Outerwear depth: {} carries {ours} products{reference}. Key for cooler-weather expansion.",
            focus.name,
        ),
        brand: None,
        value: None,
    })
}

/// Competitor volume and the focus share of the tracked catalog.
fn market_landscape(ctx: &InsightContext) -> Option<Insight> {
    let focus = ctx.focus()?;
    if ctx.total_products == 0 {
        return None;
    }

    let competitor_total: u32 = ctx.competitors().map(|stats| stats.total).sum();
    let share = pct(focus.total, ctx.total_products).round();

    Some(Insight {
        kind: InsightType::Comparison,
        metric: "market_landscape".to_string(),
        text: format!(
            "Market context: {competitor_total} competitor products tracked. {}'s {} is {share:.0}% of the tracked catalog.",
            focus.name, focus.total,
        ),
        brand: None,
        value: None,
    })
}

//! The gearlens prepare-data pipeline.
//!
//! Transforms one scraper [`StateSnapshot`](gearlens_core::StateSnapshot)
//! into one [`DashboardDocument`](document::DashboardDocument): per-brand
//! aggregates, percentage mixes, launch timelines, heuristic insights, and
//! a focus-brand scorecard. The whole pipeline is a pure synchronous
//! function of (snapshot, brand directory, thresholds, timestamp); every
//! derived structure is rebuilt from scratch per run.

pub mod aggregate;
pub mod document;
pub mod insights;
pub mod launches;
pub mod mix;
pub mod normalize;
pub mod scorecard;

mod rounding;

pub use aggregate::{aggregate_brands, Aggregates, BrandStats, Totals};
pub use document::{build_dashboard, DashboardDocument};
pub use insights::{generate_insights, Insight, InsightContext, InsightType, INSIGHT_CAP};
pub use launches::{extract_launches, LaunchData, LaunchEntry, LaunchProduct};
pub use mix::{category_mix, color_mix, CategoryMixRow, ColorMixRow};
pub use normalize::{normalize_snapshot, NormalizedRecord};
pub use scorecard::{
    generate_scorecard, Alert, HeadToHeadRow, HeadToHeadTable, Scorecard, ScorecardItem, Severity,
    Winner,
};

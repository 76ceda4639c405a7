//! The `prepare` command: one snapshot in, one dashboard document out.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use gearlens_core::Thresholds;

/// Load the brand roster and state snapshot, run the pipeline, and write
/// the dashboard document.
///
/// The consumer either gets a complete document or the previous one stays
/// in place: any failure aborts before the output file is touched.
pub fn run(state_path: &Path, out_path: &Path, brands_path: &Path) -> anyhow::Result<()> {
    let directory = gearlens_core::load_brand_directory(brands_path)
        .with_context(|| format!("loading brand roster from {}", brands_path.display()))?;

    tracing::info!(path = %state_path.display(), "loading state snapshot");
    let snapshot = gearlens_core::load_state(state_path)
        .with_context(|| format!("loading state snapshot from {}", state_path.display()))?;
    tracing::debug!(records = snapshot.record_count(), "snapshot parsed");

    let document = gearlens_pipeline::build_dashboard(
        &snapshot,
        &directory,
        &Thresholds::default(),
        Utc::now(),
    );

    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(out_path, json)
        .with_context(|| format!("writing dashboard document to {}", out_path.display()))?;

    tracing::info!(
        path = %out_path.display(),
        products = document.totals.products,
        brands = document.totals.brands,
        categories = document.totals.categories,
        subcategories = document.totals.subcategories,
        insights = document.insights.len(),
        "dashboard document written"
    );

    Ok(())
}

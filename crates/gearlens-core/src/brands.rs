//! Brand directory: the tracked-brand roster from `config/brands.yaml`.
//!
//! One brand is the *focus* brand (the reference point for the scorecard
//! and the brand-specific insight rules) and up to two others are named
//! head-to-head rivals. Display names live here so no pipeline stage
//! hardcodes its own slug-to-name table.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandEntry {
    /// Stable lowercase identifier, e.g. `"vuori"`.
    pub slug: String,
    /// Display name, e.g. `"Vuori"`.
    pub name: String,
}

/// On-disk shape of `config/brands.yaml`.
#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    pub focus: String,
    #[serde(default)]
    pub rivals: Vec<String>,
    pub brands: Vec<BrandEntry>,
}

/// Validated, queryable brand roster.
#[derive(Debug, Clone)]
pub struct BrandDirectory {
    focus: String,
    rivals: Vec<String>,
    names: BTreeMap<String, String>,
}

impl BrandDirectory {
    /// Build a directory from parts, without file-level validation.
    /// Intended for tests and embedded construction; `load_brand_directory`
    /// is the validated path.
    #[must_use]
    pub fn new(focus: &str, rivals: &[&str], entries: &[(&str, &str)]) -> Self {
        BrandDirectory {
            focus: focus.to_string(),
            rivals: rivals.iter().map(|r| (*r).to_string()).collect(),
            names: entries
                .iter()
                .map(|(slug, name)| ((*slug).to_string(), (*name).to_string()))
                .collect(),
        }
    }

    /// Slug of the focus brand.
    #[must_use]
    pub fn focus(&self) -> &str {
        &self.focus
    }

    /// Slugs of the named head-to-head rivals, in configured order.
    #[must_use]
    pub fn rivals(&self) -> &[String] {
        &self.rivals
    }

    /// Display name for a slug; unknown slugs fall back to the slug itself
    /// so brands that appear in the feed but not the roster still render.
    #[must_use]
    pub fn display_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.names.get(slug).map_or(slug, String::as_str)
    }
}

/// Load and validate the brand directory from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty names, duplicate slugs, unknown focus/rival slugs,
/// or more than two rivals).
pub fn load_brand_directory(path: &Path) -> Result<BrandDirectory, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: BrandsFile = serde_yaml::from_str(&content).map_err(ConfigError::BrandsFileParse)?;

    validate_brands(&file)?;

    Ok(BrandDirectory {
        focus: file.focus,
        rivals: file.rivals,
        names: file
            .brands
            .into_iter()
            .map(|entry| (entry.slug, entry.name))
            .collect(),
    })
}

fn validate_brands(file: &BrandsFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for entry in &file.brands {
        if entry.slug.trim().is_empty() || entry.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand slug and name must be non-empty".to_string(),
            ));
        }

        if entry.slug != entry.slug.to_lowercase() {
            return Err(ConfigError::Validation(format!(
                "brand slug '{}' must be lowercase",
                entry.slug
            )));
        }

        if !seen_slugs.insert(entry.slug.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand slug: '{}'",
                entry.slug
            )));
        }
    }

    if !seen_slugs.contains(file.focus.as_str()) {
        return Err(ConfigError::Validation(format!(
            "focus brand '{}' is not in the brands list",
            file.focus
        )));
    }

    if file.rivals.len() > 2 {
        return Err(ConfigError::Validation(format!(
            "at most two head-to-head rivals are supported, got {}",
            file.rivals.len()
        )));
    }

    for rival in &file.rivals {
        if rival == &file.focus {
            return Err(ConfigError::Validation(format!(
                "rival '{rival}' is the focus brand"
            )));
        }
        if !seen_slugs.contains(rival.as_str()) {
            return Err(ConfigError::Validation(format!(
                "rival '{rival}' is not in the brands list"
            )));
        }
    }

    Ok(())
}

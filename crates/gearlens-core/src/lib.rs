//! Shared domain types, reference data, and configuration for gearlens.
//!
//! Holds the input snapshot shape (`records`), the brand directory loaded
//! from `config/brands.yaml` (`brands`), the fixed bucket/threshold
//! reference data every pipeline stage reads (`reference`), and the
//! environment-driven application config (`config`).

pub mod app_config;
pub mod brands;
pub mod config;
pub mod error;
pub mod records;
pub mod reference;

pub use app_config::{AppConfig, Environment};
pub use brands::{load_brand_directory, BrandDirectory, BrandEntry};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, StateError};
pub use records::{load_state, ProductRecord, StateSnapshot};
pub use reference::{
    Thresholds, CATEGORY_ORDER, COLOR_ORDER, EARTH_FAMILIES, HEAD_TO_HEAD_SUBCATS,
    NEUTRAL_FAMILIES,
};

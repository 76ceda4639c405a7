use crate::app_config::{AppConfig, Environment};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars. Every variable has a default, so loading never fails.
#[must_use]
pub fn load_app_config() -> AppConfig {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
#[must_use]
pub fn load_app_config_from_env() -> AppConfig {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Decoupled from the actual environment so tests can drive it with a
/// plain `HashMap` lookup instead of mutating process env vars.
fn build_app_config<F>(lookup: F) -> AppConfig
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    AppConfig {
        env: parse_environment(&or_default("GEARLENS_ENV", "development")),
        log_level: or_default("GEARLENS_LOG_LEVEL", "info"),
        state_path: PathBuf::from(or_default("GEARLENS_STATE_PATH", "./data/state.json")),
        out_path: PathBuf::from(or_default("GEARLENS_OUT_PATH", "./data/dashboard.json")),
        brands_path: PathBuf::from(or_default("GEARLENS_BRANDS_PATH", "./config/brands.yaml")),
    }
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

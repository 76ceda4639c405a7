use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime configuration, sourced from `GEARLENS_*` environment variables.
///
/// Every field has a default; the CLI can override the paths per-invocation
/// with flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Input snapshot written by the scraper.
    pub state_path: PathBuf,
    /// Output dashboard document consumed by the presentation layer.
    pub out_path: PathBuf,
    /// Brand roster YAML.
    pub brands_path: PathBuf,
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read brands file {path}: {source}")]
    BrandsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse brands file: {0}")]
    BrandsFileParse(#[from] serde_yaml::Error),

    #[error("invalid brands configuration: {0}")]
    Validation(String),
}

/// Failures loading the scraped product snapshot.
///
/// Both variants are fatal: the pipeline does not attempt partial recovery
/// on a snapshot it cannot read or parse into the expected shape.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("state snapshot is not structurally valid: {0}")]
    Parse(#[from] serde_json::Error),
}

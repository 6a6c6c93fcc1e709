//! Config loading errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// An explicitly requested layer does not exist.
    #[error("config file not found: {}", .0.display())]
    MissingLayer(PathBuf),
    /// JSON5 syntax error in one layer.
    #[error("failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: json5::Error,
    },
    /// The merged value does not decode into the config model.
    #[error("failed to decode config: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

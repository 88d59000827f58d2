//! Error types for fixture loading.

use std::path::PathBuf;
use thiserror::Error;

/// Fixture loading error
#[derive(Debug, Error)]
pub enum FixtureError {
    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Fixture file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed glob pattern
    #[error("Invalid fixture pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Path matched by a glob could not be inspected
    #[error("Failed to expand fixture pattern: {0}")]
    Glob(#[from] glob::GlobError),
    /// Pattern matched no files
    #[error("No fixture files match: {0}")]
    NoFiles(String),
    /// Unknown file type
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
}

//! Error types for document loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an API document
#[derive(Error, Debug)]
pub enum SpecError {
    /// File could not be read
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File is not valid JSON
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// File is not valid YAML
    #[error("YAML parse error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

//! Error types for command execution

use std::path::PathBuf;
use thiserror::Error;

/// Command execution errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// No endpoint with this method and path template
    #[error("Endpoint '{method} {path}' not found")]
    EndpointNotFound { method: String, path: String },

    /// Filters left nothing to work on
    #[error("No endpoints match the given filters")]
    NoMatchingEndpoints,

    /// `--token-from-har` found no bearer token
    #[error("No bearer token found in HAR file {}", .0.display())]
    NoTokenInHar(PathBuf),
}

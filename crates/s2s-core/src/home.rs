//! Home directory resolution
//!
//! `S2S_HOME` takes precedence over the platform default so tests and
//! sandboxed runs can point config discovery at a scratch directory.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory used for global config lookup
///
/// # Precedence
///
/// 1. `S2S_HOME` environment variable (if set and non-empty)
/// 2. `dirs::home_dir()` platform default
///
/// # Errors
///
/// Returns an error if `S2S_HOME` is unset and the platform home directory
/// cannot be determined.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("S2S_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    dirs::home_dir().context("Could not determine home directory")
}

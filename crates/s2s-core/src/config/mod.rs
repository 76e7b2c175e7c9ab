//! Configuration resolution
//!
//! Resolves configuration from multiple sources with priority:
//! 1. Command-line flags (passed as parameters)
//! 2. Environment variables
//! 3. Explicit or repo-local config (.swagger2sqlmap.toml)
//! 4. Global config (~/.config/swagger2sqlmap/config.toml)
//! 5. Defaults

mod discovery;
mod types;

pub use discovery::{
    config_sources, resolve_config, ConfigError, ConfigOverrides, GLOBAL_CONFIG_PATH,
    REPO_CONFIG_FILE,
};
pub use types::{Config, TargetConfig};

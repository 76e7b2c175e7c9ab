//! Configuration types

use crate::sqlmap::SqlmapOptions;
use serde::{Deserialize, Serialize};

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Target configuration
    #[serde(default)]
    pub target: TargetConfig,
    /// sqlmap switches
    #[serde(default)]
    pub sqlmap: SqlmapOptions,
}

/// Target configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Base URL overriding the one detected from the document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Bearer token added to every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// On-disk shape of a config file; absent sections leave earlier sources intact.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub target: Option<TargetConfig>,
    #[serde(default)]
    pub sqlmap: Option<SqlmapOptions>,
}

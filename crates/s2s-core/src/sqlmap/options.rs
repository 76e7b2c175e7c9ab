//! sqlmap invocation options

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Out-of-range option values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("--level must be between 1 and 5 (got {0})")]
    Level(u8),

    #[error("--risk must be between 1 and 3 (got {0})")]
    Risk(u8),

    #[error("--threads must be between 1 and 50 (got {0})")]
    Threads(u8),

    #[error("Unknown headers mode '{0}' (expected important-only or all)")]
    HeadersMode(String),
}

/// Which request headers are forwarded to sqlmap with `-H`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeadersMode {
    /// Authorization, Cookie, Content-Type, X-CSRF-Token and `X-*`
    #[default]
    ImportantOnly,
    /// Every header except connection-level ones
    All,
}

impl fmt::Display for HeadersMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadersMode::ImportantOnly => write!(f, "important-only"),
            HeadersMode::All => write!(f, "all"),
        }
    }
}

impl FromStr for HeadersMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "important-only" | "important" => Ok(HeadersMode::ImportantOnly),
            "all" => Ok(HeadersMode::All),
            _ => Err(OptionsError::HeadersMode(s.to_string())),
        }
    }
}

/// Switches applied to every generated sqlmap command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlmapOptions {
    /// sqlmap executable name or path
    pub executable: String,
    pub include_headers: bool,
    pub headers_mode: HeadersMode,
    pub batch: bool,
    pub random_agent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tamper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technique: Option<String>,
    /// Free-form arguments appended verbatim (quote-aware split)
    pub extra_args: String,
    pub force_ssl: bool,
}

impl Default for SqlmapOptions {
    fn default() -> Self {
        Self {
            executable: "sqlmap".to_string(),
            include_headers: true,
            headers_mode: HeadersMode::ImportantOnly,
            batch: true,
            random_agent: true,
            level: Some(3),
            risk: Some(2),
            threads: None,
            tamper: None,
            technique: None,
            extra_args: String::new(),
            force_ssl: false,
        }
    }
}

impl SqlmapOptions {
    /// Check numeric switches against the ranges sqlmap accepts.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(level) = self.level
            && !(1..=5).contains(&level)
        {
            return Err(OptionsError::Level(level));
        }
        if let Some(risk) = self.risk
            && !(1..=3).contains(&risk)
        {
            return Err(OptionsError::Risk(risk));
        }
        if let Some(threads) = self.threads
            && !(1..=50).contains(&threads)
        {
            return Err(OptionsError::Threads(threads));
        }
        Ok(())
    }
}

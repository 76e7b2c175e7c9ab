//! Argument groups shared by several commands

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use swagger2sqlmap_core::auth::{normalize_token, token_from_har};
use swagger2sqlmap_core::config::{resolve_config, Config, ConfigOverrides};
use swagger2sqlmap_core::filter::EndpointFilter;
use swagger2sqlmap_core::home::get_home_dir;
use swagger2sqlmap_core::{HeadersMode, RequestContext, SqlmapOptions};
use tracing::debug;

use super::error::CommandError;

/// Where requests go and how they authenticate
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Base URL to use instead of the one detected in the document
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Bearer token (`Bearer x` and `Authorization: Bearer x` are accepted)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Take the newest bearer token from a HAR export
    #[arg(long, value_name = "FILE")]
    pub token_from_har: Option<PathBuf>,

    /// Read configuration from this file instead of .swagger2sqlmap.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl TargetArgs {
    /// Resolve configuration with these flags applied on top.
    pub fn resolve(&self, executable: Option<String>) -> Result<Config> {
        let home_dir = get_home_dir()?;
        let current_dir = std::env::current_dir()?;

        let token = match (&self.token, &self.token_from_har) {
            (Some(token), _) => Some(token.clone()),
            (None, Some(har)) => Some(
                token_from_har(har)?.ok_or_else(|| CommandError::NoTokenInHar(har.clone()))?,
            ),
            (None, None) => None,
        };

        let overrides = ConfigOverrides {
            base_url: self.base_url.clone(),
            token,
            executable,
            config_path: self.config.clone(),
        };
        Ok(resolve_config(&overrides, &current_dir, &home_dir)?)
    }
}

/// Build the request context from resolved config and the detected base URL.
pub fn request_context(config: &Config, detected_base_url: &str) -> RequestContext {
    let base_url = config
        .target
        .base_url
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .unwrap_or(detected_base_url)
        .to_string();
    let token = config
        .target
        .token
        .as_deref()
        .map(normalize_token)
        .filter(|t| !t.is_empty());

    debug!(
        "Request context: base_url={base_url:?}, token {}",
        if token.is_some() { "set" } else { "unset" }
    );
    RequestContext { base_url, token }
}

/// Endpoint selection
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive text matched against method, path, operationId and summary
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Only this HTTP method (ALL for any)
    #[arg(long, value_name = "METHOD")]
    pub method: Option<String>,

    /// Only this exact path template
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> EndpointFilter {
        EndpointFilter {
            search: self.search.clone(),
            method: self.method.clone(),
            path: self.path.clone(),
        }
    }
}

/// sqlmap switches
#[derive(Args, Debug, Default)]
pub struct SqlmapArgs {
    /// sqlmap executable
    #[arg(long = "sqlmap", value_name = "EXE")]
    pub executable: Option<String>,

    /// --level (1-5)
    #[arg(long)]
    pub level: Option<u8>,

    /// --risk (1-3)
    #[arg(long)]
    pub risk: Option<u8>,

    /// --threads (1-50)
    #[arg(long)]
    pub threads: Option<u8>,

    /// Tamper scripts, comma separated
    #[arg(long)]
    pub tamper: Option<String>,

    /// Injection techniques (e.g. BEUSTQ)
    #[arg(long)]
    pub technique: Option<String>,

    /// Extra arguments appended to every command
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub extra_args: Option<String>,

    /// Which headers to pass with -H
    #[arg(long, value_name = "MODE")]
    pub headers_mode: Option<HeadersMode>,

    /// Do not pass any headers
    #[arg(long)]
    pub no_headers: bool,

    /// Omit --batch
    #[arg(long)]
    pub no_batch: bool,

    /// Omit --random-agent
    #[arg(long)]
    pub no_random_agent: bool,

    /// Add --force-ssl
    #[arg(long)]
    pub force_ssl: bool,
}

impl SqlmapArgs {
    /// Layer the flags over configured options and validate the result.
    pub fn apply(&self, mut options: SqlmapOptions) -> Result<SqlmapOptions> {
        if self.level.is_some() {
            options.level = self.level;
        }
        if self.risk.is_some() {
            options.risk = self.risk;
        }
        if self.threads.is_some() {
            options.threads = self.threads;
        }
        if let Some(ref tamper) = self.tamper {
            options.tamper = Some(tamper.clone());
        }
        if let Some(ref technique) = self.technique {
            options.technique = Some(technique.clone());
        }
        if let Some(ref extra) = self.extra_args {
            options.extra_args = extra.clone();
        }
        if let Some(mode) = self.headers_mode {
            options.headers_mode = mode;
        }
        if self.no_headers {
            options.include_headers = false;
        }
        if self.no_batch {
            options.batch = false;
        }
        if self.no_random_agent {
            options.random_agent = false;
        }
        if self.force_ssl {
            options.force_ssl = true;
        }

        options.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swagger2sqlmap_core::config::TargetConfig;

    #[test]
    fn test_request_context_prefers_config_base_url() {
        let config = Config {
            target: TargetConfig {
                base_url: Some("https://override.example.com".to_string()),
                token: Some("Authorization: Bearer abc".to_string()),
            },
            ..Default::default()
        };
        let context = request_context(&config, "https://detected.example.com");
        assert_eq!(context.base_url, "https://override.example.com");
        assert_eq!(context.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_request_context_falls_back_to_detected() {
        let config = Config {
            target: TargetConfig {
                base_url: Some("  ".to_string()),
                token: Some("Bearer ".to_string()),
            },
            ..Default::default()
        };
        let context = request_context(&config, "https://detected.example.com");
        assert_eq!(context.base_url, "https://detected.example.com");
        assert_eq!(context.token, None);
    }

    #[test]
    fn test_sqlmap_args_apply() {
        let args = SqlmapArgs {
            level: Some(5),
            threads: Some(10),
            headers_mode: Some(HeadersMode::All),
            no_batch: true,
            force_ssl: true,
            ..Default::default()
        };
        let options = args.apply(SqlmapOptions::default()).unwrap();
        assert_eq!(options.level, Some(5));
        assert_eq!(options.risk, Some(2));
        assert_eq!(options.threads, Some(10));
        assert_eq!(options.headers_mode, HeadersMode::All);
        assert!(!options.batch);
        assert!(options.random_agent);
        assert!(options.force_ssl);
    }

    #[test]
    fn test_sqlmap_args_validate() {
        let args = SqlmapArgs {
            risk: Some(4),
            ..Default::default()
        };
        assert!(args.apply(SqlmapOptions::default()).is_err());
    }
}

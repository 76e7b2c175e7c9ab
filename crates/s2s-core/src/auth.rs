//! Bearer token handling
//!
//! Tokens can be pasted in several shapes (`Authorization: Bearer x`,
//! `Bearer x`, or the bare token) and can be recovered from recorded
//! traffic in an HTTP Archive (HAR) export.

use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading a HAR file
#[derive(Error, Debug)]
pub enum HarError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid HAR file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

fn header_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^authorization\s*:\s*bearer\s+").expect("static regex is valid")
    })
}

fn bearer_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^bearer\s+").expect("static regex is valid"))
}

/// Strip `Authorization: Bearer` / `Bearer` prefixes from a pasted token.
///
/// The result may be empty.
pub fn normalize_token(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_header = header_prefix().replace(trimmed, "");
    bearer_prefix().replace(&without_header, "").into_owned()
}

#[derive(Debug, Deserialize)]
struct Har {
    log: HarLog,
}

#[derive(Debug, Deserialize)]
struct HarLog {
    #[serde(default)]
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    request: HarRequest,
}

#[derive(Debug, Deserialize)]
struct HarRequest {
    #[serde(default)]
    headers: Vec<HarHeader>,
}

#[derive(Debug, Deserialize)]
struct HarHeader {
    name: String,
    value: String,
}

/// Find the most recent bearer token in a HAR export.
///
/// Entries are scanned newest first; the first `Authorization: Bearer ...`
/// header wins. Returns `Ok(None)` when no request carried one.
pub fn token_from_har(path: &Path) -> Result<Option<String>, HarError> {
    let contents = std::fs::read_to_string(path).map_err(|source| HarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let har: Har = serde_json::from_str(&contents).map_err(|source| HarError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let token = har
        .log
        .entries
        .iter()
        .rev()
        .flat_map(|entry| entry.request.headers.iter())
        .filter(|h| h.name.eq_ignore_ascii_case("authorization"))
        .find_map(|h| bearer_value(&h.value));

    debug!(
        "Scanned {} HAR entries in {}: token {}",
        har.log.entries.len(),
        path.display(),
        if token.is_some() { "found" } else { "not found" }
    );
    Ok(token)
}

fn bearer_value(header_value: &str) -> Option<String> {
    let value = header_value.trim();
    let prefix = value.get(..7)?;
    if !prefix.eq_ignore_ascii_case("bearer ") {
        return None;
    }
    Some(value[7..].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_token_shapes() {
        assert_eq!(normalize_token("abc.def"), "abc.def");
        assert_eq!(normalize_token("  Bearer abc.def \n"), "abc.def");
        assert_eq!(normalize_token("bearer   abc"), "abc");
        assert_eq!(normalize_token("Authorization: Bearer abc"), "abc");
        assert_eq!(normalize_token("AUTHORIZATION :bearer abc"), "abc");
        assert_eq!(normalize_token("   "), "");
    }

    #[test]
    fn test_normalize_token_keeps_other_schemes() {
        assert_eq!(normalize_token("Basic dXNlcjpwYXNz"), "Basic dXNlcjpwYXNz");
    }

    fn write_har(dir: &TempDir, entries: serde_json::Value) -> PathBuf {
        let path = dir.path().join("traffic.har");
        let har = json!({"log": {"version": "1.2", "entries": entries}});
        std::fs::write(&path, serde_json::to_string(&har).unwrap()).unwrap();
        path
    }

    fn entry(headers: serde_json::Value) -> serde_json::Value {
        json!({
            "startedDateTime": "2026-01-31T12:00:00Z",
            "request": {"method": "GET", "url": "https://api.example.com/", "headers": headers},
            "response": {"status": 200}
        })
    }

    #[test]
    fn test_har_newest_token_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_har(
            &dir,
            json!([
                entry(json!([{"name": "Authorization", "value": "Bearer old-token"}])),
                entry(json!([{"name": "Accept", "value": "*/*"}])),
                entry(json!([{"name": "authorization", "value": "bearer  new-token "}])),
            ]),
        );

        assert_eq!(token_from_har(&path).unwrap().as_deref(), Some("new-token"));
    }

    #[test]
    fn test_har_skips_non_bearer_authorization() {
        let dir = TempDir::new().unwrap();
        let path = write_har(
            &dir,
            json!([
                entry(json!([{"name": "Authorization", "value": "Bearer kept"}])),
                entry(json!([{"name": "Authorization", "value": "Basic Zm9vOmJhcg=="}])),
            ]),
        );

        assert_eq!(token_from_har(&path).unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn test_har_without_token() {
        let dir = TempDir::new().unwrap();
        let path = write_har(&dir, json!([entry(json!([]))]));
        assert_eq!(token_from_har(&path).unwrap(), None);
    }

    #[test]
    fn test_har_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.har");
        std::fs::write(&path, "{\"entries\": []}").unwrap();
        assert!(matches!(token_from_har(&path), Err(HarError::Json { .. })));

        let missing = dir.path().join("missing.har");
        assert!(matches!(token_from_har(&missing), Err(HarError::Io { .. })));
    }
}

//! HTTP request reconstruction for endpoints

use crate::model::Endpoint;
use crate::openapi::template::JSON_MEDIA_TYPE;
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;
use url::Url;

/// Host used when no base URL is known
pub const DEFAULT_BASE_URL: &str = "http://example.com";

/// Substituted for every `{param}` path segment
const PATH_PARAM_PLACEHOLDER: &str = "1";

/// Where requests are sent and how they are authenticated
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub base_url: String,
    /// Bearer token without the `Bearer ` prefix
    pub token: Option<String>,
}

/// A fully materialized HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub url: String,
    /// Header name/value pairs in wire order
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Render the request as HTTP/1.1 text (CRLF line endings).
    pub fn to_raw(&self) -> String {
        let target = Url::parse(&self.url)
            .map(|u| match u.query() {
                Some(query) => format!("{}?{query}", u.path()),
                None => u.path().to_string(),
            })
            .unwrap_or_else(|_| "/".to_string());

        let mut raw = format!("{} {target} HTTP/1.1\r\n", self.method);
        for (name, value) in &self.headers {
            raw.push_str(&format!("{name}: {value}\r\n"));
        }
        raw.push_str("\r\n");
        if let Some(body) = &self.body {
            raw.push_str(body);
        }
        raw
    }
}

fn path_param() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{[^/]+\}").expect("static regex is valid"))
}

/// Join a base URL and a path template into a concrete absolute URL.
///
/// Path parameters become `1`. A host-relative base (`/api/v3`) is placed
/// under `http://example.com`. Anything else that does not form a valid
/// absolute URL falls back to `http://example.com/`.
pub fn join_url(base: &str, path: &str) -> String {
    let mut base = base.trim();
    if let Some(stripped) = base.strip_suffix('/') {
        base = stripped;
    }
    let base = if base.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else if base.starts_with('/') {
        warn!("Base URL {base:?} has no host; using {DEFAULT_BASE_URL} (pass --base-url to override)");
        format!("{DEFAULT_BASE_URL}{base}")
    } else {
        base.to_string()
    };

    let path = path.trim();
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let path = path_param().replace_all(&path, PATH_PARAM_PLACEHOLDER);

    Url::parse(&format!("{base}{path}"))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| {
            warn!("Cannot build a URL from {base:?} and {path:?}; using {DEFAULT_BASE_URL}/");
            format!("{DEFAULT_BASE_URL}/")
        })
}

/// Build the request sent for `endpoint`.
pub fn build_request(endpoint: &Endpoint, context: &RequestContext) -> HttpRequest {
    let url = join_url(&context.base_url, &endpoint.path);
    let mut headers = Vec::new();

    if let Some(host) = host_header(&url) {
        headers.push(("Host".to_string(), host));
    }

    if let Some(token) = context.token.as_deref().map(str::trim)
        && !token.is_empty()
    {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }

    let body = endpoint
        .body_template
        .as_ref()
        .filter(|_| endpoint.has_body())
        .cloned();

    if let Some(body) = &body {
        let content_type = endpoint
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(JSON_MEDIA_TYPE);
        headers.push(("Content-Type".to_string(), content_type.to_string()));
        headers.push(("Content-Length".to_string(), body.len().to_string()));
    }

    HttpRequest {
        method: endpoint.method.to_uppercase(),
        url,
        headers,
        body,
    }
}

fn host_header(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

//! Endpoint and base URL extraction

use super::error::SpecError;
use super::template::{
    build_value, form_encode, scalar_from_param, serialize_body, FORM_MEDIA_TYPE, JSON_MEDIA_TYPE,
};
use super::{text_of, SpecFormat, SpecVersion};
use crate::model::{Endpoint, ParseResult};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const HTTP_METHODS: [&str; 7] = ["get", "post", "put", "delete", "patch", "head", "options"];

/// Trailing slashes are only stripped while the URL is longer than this.
const MIN_BASE_URL: &str = "https://x";

/// Upper bound on chained local `$ref` hops for request bodies and parameters.
const MAX_REF_HOPS: usize = 8;

/// Load and parse a document from disk.
///
/// # Errors
///
/// Returns [`SpecError`] when the file cannot be read or decoded.
pub fn parse_file(path: &Path) -> Result<ParseResult, SpecError> {
    let contents = fs::read_to_string(path).map_err(|source| SpecError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let root = decode(&contents, SpecFormat::from_path(path), path)?;
    let result = parse_value(&root);

    debug!(
        "Parsed {}: base_url={:?}, endpoints={}",
        path.display(),
        result.base_url,
        result.endpoints.len()
    );
    Ok(result)
}

/// Parse a document held in memory.
pub fn parse_str(text: &str, format: SpecFormat) -> Result<ParseResult, SpecError> {
    let root = decode(text, format, Path::new("<input>"))?;
    Ok(parse_value(&root))
}

/// Parse an already decoded document.
pub fn parse_value(root: &Value) -> ParseResult {
    ParseResult {
        base_url: detect_base_url(root),
        endpoints: extract_endpoints(root),
    }
}

fn decode(text: &str, format: SpecFormat, path: &Path) -> Result<Value, SpecError> {
    match format {
        SpecFormat::Json => serde_json::from_str(text).map_err(|source| SpecError::Json {
            path: path.to_path_buf(),
            source,
        }),
        SpecFormat::Yaml => {
            // Mapping keys may be non-strings (`200:` under responses)
            let yaml_err = |source: serde_yaml::Error| SpecError::Yaml {
                path: path.to_path_buf(),
                source,
            };
            let mut yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(yaml_err)?;
            yaml.apply_merge().map_err(yaml_err)?;
            serde_json::to_value(yaml).map_err(|source| SpecError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Detect the API base URL.
///
/// OpenAPI 3 uses `servers[0].url`; Swagger 2 combines `schemes[0]`
/// (default `https`), `host` and `basePath`. Returns an empty string when
/// neither is present.
pub fn detect_base_url(root: &Value) -> String {
    if let Some(server) = root
        .get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
    {
        let url = normalize_base_url(&text_of(server.get("url")));
        if !url.is_empty() {
            return url;
        }
    }

    let host = text_of(root.get("host"));
    if host.is_empty() {
        return String::new();
    }

    let scheme = root
        .get("schemes")
        .and_then(Value::as_array)
        .and_then(|schemes| schemes.first())
        .map(|s| text_of(Some(s)))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "https".to_string());
    let base_path = normalize_path(&text_of(root.get("basePath")));

    normalize_base_url(&format!("{scheme}://{host}{base_path}"))
}

/// Extract every operation under `paths`, sorted by path then method.
pub fn extract_endpoints(root: &Value) -> Vec<Endpoint> {
    let Some(paths) = root.get("paths").and_then(Value::as_object) else {
        return Vec::new();
    };

    let version = SpecVersion::detect(root);
    let mut endpoints = Vec::new();

    for (path, item) in paths {
        let Some(operations) = item.as_object() else {
            continue;
        };

        for (method, operation) in operations {
            if !is_http_method(method) {
                continue;
            }

            let mut summary = text_of(operation.get("summary"));
            if summary.is_empty() {
                summary = text_of(operation.get("description"));
            }

            let body = match version {
                SpecVersion::OpenApi3 => body_openapi3(root, operation),
                SpecVersion::Swagger2 => body_swagger2(root, operation),
            };

            endpoints.push(Endpoint {
                method: method.to_uppercase(),
                path: path.clone(),
                operation_id: non_empty(&text_of(operation.get("operationId"))),
                summary: non_empty(&summary),
                content_type: body.content_type,
                body_template: body.template,
            });
        }
    }

    endpoints.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)));
    endpoints
}

fn is_http_method(key: &str) -> bool {
    HTTP_METHODS.iter().any(|m| m.eq_ignore_ascii_case(key))
}

fn normalize_base_url(raw: &str) -> String {
    let mut url = raw.trim();
    while url.ends_with('/') && url.len() > MIN_BASE_URL.len() {
        url = &url[..url.len() - 1];
    }
    url.to_string()
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    if path.ends_with('/') {
        path.pop();
    }
    path
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Follow local (`#/...`) references; anything unresolvable is returned as-is.
fn resolve_local<'a>(root: &'a Value, node: &'a Value) -> &'a Value {
    let mut current = node;
    for _ in 0..MAX_REF_HOPS {
        let Some(pointer) = current
            .get("$ref")
            .and_then(Value::as_str)
            .and_then(|r| r.strip_prefix('#'))
        else {
            break;
        };
        match root.pointer(pointer) {
            Some(target) => current = target,
            None => break,
        }
    }
    current
}

#[derive(Debug, Default)]
struct BodyInfo {
    content_type: Option<String>,
    template: Option<String>,
}

fn body_openapi3(root: &Value, operation: &Value) -> BodyInfo {
    let Some(request_body) = operation.get("requestBody").filter(|rb| !rb.is_null()) else {
        return BodyInfo::default();
    };
    let request_body = resolve_local(root, request_body);

    let Some(content) = request_body.get("content").and_then(Value::as_object) else {
        return BodyInfo::default();
    };

    let content_type = if content.contains_key(JSON_MEDIA_TYPE) {
        JSON_MEDIA_TYPE.to_string()
    } else {
        match content.keys().next() {
            Some(first) => first.clone(),
            None => return BodyInfo::default(),
        }
    };

    let schema = content
        .get(&content_type)
        .and_then(|media| media.get("schema"))
        .filter(|s| !s.is_null());
    let Some(schema) = schema else {
        return BodyInfo {
            content_type: Some(content_type),
            template: None,
        };
    };

    let value = build_value(root, Some(schema), SpecVersion::OpenApi3, 0, &mut HashSet::new());
    let template = serialize_body(&content_type, &value);

    BodyInfo {
        content_type: Some(content_type),
        template: Some(template),
    }
}

fn body_swagger2(root: &Value, operation: &Value) -> BodyInfo {
    let Some(params) = operation.get("parameters").and_then(Value::as_array) else {
        return BodyInfo::default();
    };
    let params: Vec<&Value> = params.iter().map(|p| resolve_local(root, p)).collect();

    if let Some(body_param) = params
        .iter()
        .find(|p| text_of(p.get("in")).eq_ignore_ascii_case("body"))
    {
        let content_type =
            pick_consumes(operation, root).unwrap_or_else(|| JSON_MEDIA_TYPE.to_string());
        let value = build_value(
            root,
            body_param.get("schema"),
            SpecVersion::Swagger2,
            0,
            &mut HashSet::new(),
        );
        let template = serialize_body(&content_type, &value);

        return BodyInfo {
            content_type: Some(content_type),
            template: Some(template),
        };
    }

    let mut form = Map::new();
    for param in params
        .iter()
        .filter(|p| text_of(p.get("in")).eq_ignore_ascii_case("formData"))
    {
        let name = text_of(param.get("name"));
        if name.is_empty() {
            continue;
        }
        form.insert(name, scalar_from_param(param));
    }

    if form.is_empty() {
        return BodyInfo::default();
    }

    let content_type =
        pick_consumes(operation, root).unwrap_or_else(|| FORM_MEDIA_TYPE.to_string());
    let template = if content_type.eq_ignore_ascii_case(FORM_MEDIA_TYPE) {
        form_encode(&form)
    } else {
        serialize_body(&content_type, &Value::Object(form))
    };

    BodyInfo {
        content_type: Some(content_type),
        template: Some(template),
    }
}

/// Operation-level `consumes`, falling back to the root list.
/// `application/json` is preferred whenever it is listed.
fn pick_consumes(operation: &Value, root: &Value) -> Option<String> {
    let consumes = operation
        .get("consumes")
        .and_then(Value::as_array)
        .filter(|c| !c.is_empty())
        .or_else(|| root.get("consumes").and_then(Value::as_array))?;

    if consumes
        .iter()
        .any(|c| text_of(Some(c)).eq_ignore_ascii_case(JSON_MEDIA_TYPE))
    {
        return Some(JSON_MEDIA_TYPE.to_string());
    }

    consumes
        .first()
        .map(|c| text_of(Some(c)))
        .filter(|c| !c.is_empty())
}

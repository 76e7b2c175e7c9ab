//! Endpoint model extracted from an API document

use serde::{Deserialize, Serialize};

/// A single operation from the document's `paths` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Upper-case HTTP verb
    pub method: String,

    /// Path template as written in the document (e.g. `/users/{id}`)
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Operation summary, falling back to its description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Media type of the request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Serialized example request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_template: Option<String>,
}

impl Endpoint {
    /// Create an endpoint with no metadata and no body.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            operation_id: None,
            summary: None,
            content_type: None,
            body_template: None,
        }
    }

    /// Whether the endpoint carries a non-blank body template.
    pub fn has_body(&self) -> bool {
        self.body_template
            .as_deref()
            .is_some_and(|b| !b.trim().is_empty())
    }

    /// `METHOD PATH`, used for banners and error messages.
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Outcome of parsing one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Detected base URL, empty when the document declares none
    pub base_url: String,
    pub endpoints: Vec<Endpoint>,
}

//! Swagger 2 / OpenAPI 3 document parsing
//!
//! Documents are decoded into a `serde_json::Value` (YAML included) and
//! walked directly rather than through a typed schema, so partially valid or
//! vendor-extended documents still yield every endpoint that can be read.
//!
//! ```rust,no_run
//! use swagger2sqlmap_core::openapi::parse_file;
//! use std::path::Path;
//!
//! let parsed = parse_file(Path::new("petstore.json")).unwrap();
//! println!("base URL: {}", parsed.base_url);
//! for endpoint in &parsed.endpoints {
//!     println!("{}", endpoint.label());
//! }
//! ```

pub mod error;
pub mod parser;
pub mod template;

use serde_json::Value;
use std::path::Path;

pub use error::SpecError;
pub use parser::{detect_base_url, extract_endpoints, parse_file, parse_str, parse_value};

/// Serialization of the document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// `.yaml` / `.yml` files are YAML; everything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => SpecFormat::Yaml,
            _ => SpecFormat::Json,
        }
    }
}

/// Document dialect, decided by the presence of a root `openapi` key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecVersion {
    Swagger2,
    OpenApi3,
}

impl SpecVersion {
    pub fn detect(root: &Value) -> Self {
        if root.get("openapi").is_some() {
            SpecVersion::OpenApi3
        } else {
            SpecVersion::Swagger2
        }
    }

    /// Container that named `$ref` schemas resolve against.
    fn schemas(self, root: &Value) -> Option<&Value> {
        match self {
            SpecVersion::OpenApi3 => root.get("components").and_then(|c| c.get("schemas")),
            SpecVersion::Swagger2 => root.get("definitions"),
        }
    }
}

/// Lenient text accessor: strings as-is, numbers and booleans rendered,
/// anything else empty.
pub(crate) fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

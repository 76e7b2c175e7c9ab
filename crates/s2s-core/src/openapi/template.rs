//! Example value generation from schemas
//!
//! Every schema is turned into a concrete, typed placeholder value so that
//! generated request bodies are accepted by the target's validation layer
//! and the injection points land in realistic positions.

use super::{text_of, SpecVersion};
use serde_json::{Map, Value};
use std::collections::HashSet;
use url::form_urlencoded;

/// Nested objects deeper than this collapse to `{}`.
const MAX_OBJECT_DEPTH: usize = 8;

const PLACEHOLDER_TEXT: &str = "text";
const JSON_FALLBACK: &str = r#"{"value":"text"}"#;

pub const JSON_MEDIA_TYPE: &str = "application/json";
pub const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Build an example value for `schema`.
///
/// `refs` holds the `$ref` strings currently being expanded on this branch;
/// a reference that is already on it resolves to an empty object.
pub fn build_value(
    root: &Value,
    schema: Option<&Value>,
    version: SpecVersion,
    depth: usize,
    refs: &mut HashSet<String>,
) -> Value {
    let Some(schema) = schema.filter(|s| !s.is_null()) else {
        return Value::String(PLACEHOLDER_TEXT.to_string());
    };

    if let Some(example) = pick_example(schema) {
        return example.clone();
    }

    if let Some(reference) = schema.get("$ref") {
        let key = text_of(Some(reference));
        if !refs.insert(key.clone()) {
            return Value::Object(Map::new());
        }

        let name = last_ref_name(&key);
        if !name.is_empty() {
            let resolved = version.schemas(root).and_then(|s| s.get(name));
            let value = build_value(root, resolved, version, depth + 1, refs);
            refs.remove(&key);
            return value;
        }
        refs.remove(&key);
    }

    if version == SpecVersion::OpenApi3 {
        for keyword in ["allOf", "oneOf", "anyOf"] {
            if let Some(first) = schema
                .get(keyword)
                .and_then(Value::as_array)
                .and_then(|variants| variants.first())
            {
                return build_value(root, Some(first), version, depth + 1, refs);
            }
        }
    }

    let schema_type = schema_type(schema);

    if schema_type == "object" || schema.get("properties").is_some() {
        if depth > MAX_OBJECT_DEPTH {
            return Value::Object(Map::new());
        }

        let mut map = Map::new();
        if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                let mut branch = refs.clone();
                let value = build_value(root, Some(property), version, depth + 1, &mut branch);
                map.insert(name.clone(), value);
            }
        }
        return Value::Object(map);
    }

    if schema_type == "array" {
        let item = build_value(root, schema.get("items"), version, depth + 1, refs);
        return Value::Array(vec![item]);
    }

    scalar_from_schema(schema)
}

/// Placeholder scalar for a leaf schema.
pub fn scalar_from_schema(schema: &Value) -> Value {
    if let Some(value) = first_enum_or_default(schema) {
        return value;
    }

    let schema_type = schema_type(schema);
    let format = text_of(schema.get("format"));

    match schema_type.as_str() {
        "integer" => Value::from(5),
        "number" => Value::from(1.5),
        "boolean" => Value::Bool(true),
        "string" => {
            let text = match format.as_str() {
                "date-time" => "2026-01-31T12:00:00Z",
                "date" => "2026-01-31",
                "uuid" => "11111111-1111-1111-1111-111111111111",
                "email" => "user@example.com",
                "uri" | "url" => "https://example.com/",
                "password" => "Passw0rd!",
                _ => PLACEHOLDER_TEXT,
            };
            Value::String(text.to_string())
        }
        _ => Value::String(PLACEHOLDER_TEXT.to_string()),
    }
}

/// Placeholder scalar for a Swagger 2 `formData` parameter.
///
/// Parameters carry their type inline, and integer/number are also inferred
/// from the format alone.
pub fn scalar_from_param(param: &Value) -> Value {
    if let Some(example) = pick_example(param) {
        return example.clone();
    }
    if let Some(value) = first_enum_or_default(param) {
        return value;
    }

    let param_type = text_of(param.get("type"));
    let format = text_of(param.get("format"));

    if param_type == "integer" || format == "int32" || format == "int64" {
        return Value::from(5);
    }
    if param_type == "number" || format == "float" || format == "double" {
        return Value::from(1.5);
    }
    if param_type == "boolean" {
        return Value::Bool(true);
    }

    let text = if param_type == "string" {
        match format.as_str() {
            "date-time" => "2026-01-31T12:00:00Z",
            "date" => "2026-01-31",
            "uuid" => "11111111-1111-1111-1111-111111111111",
            "email" => "user@example.com",
            _ => PLACEHOLDER_TEXT,
        }
    } else {
        PLACEHOLDER_TEXT
    };
    Value::String(text.to_string())
}

/// Serialize an example body for the given media type.
pub fn serialize_body(content_type: &str, body: &Value) -> String {
    let lowered = content_type.to_ascii_lowercase();

    if !lowered.contains("json") && lowered.contains("x-www-form-urlencoded") {
        match body {
            Value::String(s) => return s.clone(),
            Value::Object(map) => return form_encode(map),
            _ => {}
        }
    }

    serde_json::to_string(body).unwrap_or_else(|_| JSON_FALLBACK.to_string())
}

/// `application/x-www-form-urlencoded` encoding, keeping key order.
pub fn form_encode(form: &Map<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form {
        serializer.append_pair(key, &plain_text(value));
    }
    serializer.finish()
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pick_example(node: &Value) -> Option<&Value> {
    node.get("example").filter(|e| !e.is_null())
}

fn first_enum_or_default(node: &Value) -> Option<Value> {
    if let Some(first) = node
        .get("enum")
        .and_then(Value::as_array)
        .and_then(|values| values.first())
    {
        return Some(first.clone());
    }
    node.get("default").filter(|d| !d.is_null()).cloned()
}

/// `type` as a string; for OpenAPI 3.1 type arrays, the first non-null entry.
fn schema_type(schema: &Value) -> String {
    match schema.get("type") {
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .unwrap_or_default()
            .to_string(),
        other => text_of(other),
    }
}

fn last_ref_name(reference: &str) -> &str {
    reference
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(root: &Value, schema: &Value, version: SpecVersion) -> Value {
        build_value(root, Some(schema), version, 0, &mut HashSet::new())
    }

    #[test]
    fn test_missing_schema_is_text() {
        let value = build_value(&json!({}), None, SpecVersion::OpenApi3, 0, &mut HashSet::new());
        assert_eq!(value, json!("text"));

        let value = build(&json!({}), &Value::Null, SpecVersion::Swagger2);
        assert_eq!(value, json!("text"));
    }

    #[test]
    fn test_example_wins_over_everything() {
        let schema = json!({
            "type": "integer",
            "enum": [7, 8],
            "default": 9,
            "example": 42
        });
        assert_eq!(build(&json!({}), &schema, SpecVersion::OpenApi3), json!(42));
    }

    #[test]
    fn test_enum_then_default() {
        let with_enum = json!({"type": "string", "enum": ["asc", "desc"], "default": "desc"});
        assert_eq!(scalar_from_schema(&with_enum), json!("asc"));

        let with_default = json!({"type": "integer", "default": 25});
        assert_eq!(scalar_from_schema(&with_default), json!(25));

        let null_default = json!({"type": "integer", "default": null});
        assert_eq!(scalar_from_schema(&null_default), json!(5));
    }

    #[test]
    fn test_scalar_placeholders() {
        assert_eq!(scalar_from_schema(&json!({"type": "integer"})), json!(5));
        assert_eq!(scalar_from_schema(&json!({"type": "number"})), json!(1.5));
        assert_eq!(scalar_from_schema(&json!({"type": "boolean"})), json!(true));
        assert_eq!(scalar_from_schema(&json!({"type": "string"})), json!("text"));
        assert_eq!(
            scalar_from_schema(&json!({"type": "string", "format": "date-time"})),
            json!("2026-01-31T12:00:00Z")
        );
        assert_eq!(
            scalar_from_schema(&json!({"type": "string", "format": "uuid"})),
            json!("11111111-1111-1111-1111-111111111111")
        );
        assert_eq!(
            scalar_from_schema(&json!({"type": "string", "format": "uri"})),
            json!("https://example.com/")
        );
        assert_eq!(
            scalar_from_schema(&json!({"type": "string", "format": "password"})),
            json!("Passw0rd!")
        );
        assert_eq!(scalar_from_schema(&json!({"type": "file"})), json!("text"));
    }

    #[test]
    fn test_type_array_uses_first_non_null() {
        let schema = json!({"type": ["null", "integer"]});
        assert_eq!(scalar_from_schema(&schema), json!(5));
    }

    #[test]
    fn test_object_keeps_property_order() {
        let schema = json!({
            "type": "object",
            "properties": {
                "zeta": {"type": "string"},
                "alpha": {"type": "integer"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        });
        let value = build(&json!({}), &schema, SpecVersion::OpenApi3);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"zeta":"text","alpha":5,"tags":["text"]}"#
        );
    }

    #[test]
    fn test_properties_without_type_is_object() {
        let schema = json!({"properties": {"id": {"type": "integer"}}});
        assert_eq!(build(&json!({}), &schema, SpecVersion::Swagger2), json!({"id": 5}));
    }

    #[test]
    fn test_openapi3_ref_resolution() {
        let root = json!({
            "components": {"schemas": {
                "Pet": {"type": "object", "properties": {"name": {"type": "string"}}}
            }}
        });
        let value = build(&root, &json!({"$ref": "#/components/schemas/Pet"}), SpecVersion::OpenApi3);
        assert_eq!(value, json!({"name": "text"}));
    }

    #[test]
    fn test_swagger2_ref_resolves_definitions() {
        let root = json!({
            "definitions": {
                "Order": {"type": "object", "properties": {"quantity": {"type": "integer"}}}
            }
        });
        let value = build(&root, &json!({"$ref": "#/definitions/Order"}), SpecVersion::Swagger2);
        assert_eq!(value, json!({"quantity": 5}));
    }

    #[test]
    fn test_unresolvable_ref_is_text() {
        let value = build(&json!({}), &json!({"$ref": "#/definitions/Missing"}), SpecVersion::Swagger2);
        assert_eq!(value, json!("text"));
    }

    #[test]
    fn test_circular_ref_stops_with_empty_object() {
        let root = json!({
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "next": {"$ref": "#/definitions/Node"}
                    }
                }
            }
        });
        let value = build(&root, &json!({"$ref": "#/definitions/Node"}), SpecVersion::Swagger2);
        assert_eq!(value, json!({"name": "text", "next": {}}));
    }

    #[test]
    fn test_sibling_refs_both_expand() {
        let root = json!({
            "components": {"schemas": {
                "Tag": {"type": "object", "properties": {"label": {"type": "string"}}},
                "Post": {
                    "type": "object",
                    "properties": {
                        "primary": {"$ref": "#/components/schemas/Tag"},
                        "secondary": {"$ref": "#/components/schemas/Tag"}
                    }
                }
            }}
        });
        let value = build(&root, &json!({"$ref": "#/components/schemas/Post"}), SpecVersion::OpenApi3);
        assert_eq!(
            value,
            json!({"primary": {"label": "text"}, "secondary": {"label": "text"}})
        );
    }

    #[test]
    fn test_composition_takes_first_variant_for_openapi3_only() {
        let schema = json!({
            "oneOf": [
                {"type": "integer"},
                {"type": "string"}
            ]
        });
        assert_eq!(build(&json!({}), &schema, SpecVersion::OpenApi3), json!(5));
        assert_eq!(build(&json!({}), &schema, SpecVersion::Swagger2), json!("text"));
    }

    #[test]
    fn test_deep_nesting_collapses() {
        let mut schema = json!({"type": "string"});
        for _ in 0..12 {
            schema = json!({"type": "object", "properties": {"child": schema}});
        }

        let value = build(&json!({}), &schema, SpecVersion::OpenApi3);
        let mut cursor = &value;
        for _ in 0..8 {
            cursor = &cursor["child"];
        }
        assert!(cursor.get("child").is_some());
        assert_eq!(cursor["child"], json!({}));
    }

    #[test]
    fn test_param_scalar_inference() {
        assert_eq!(scalar_from_param(&json!({"type": "string", "format": "int64"})), json!(5));
        assert_eq!(scalar_from_param(&json!({"format": "double"})), json!(1.5));
        assert_eq!(scalar_from_param(&json!({"type": "boolean"})), json!(true));
        assert_eq!(
            scalar_from_param(&json!({"type": "string", "format": "email"})),
            json!("user@example.com")
        );
        // uri is not special-cased for form parameters
        assert_eq!(scalar_from_param(&json!({"type": "string", "format": "uri"})), json!("text"));
        assert_eq!(scalar_from_param(&json!({"type": "file"})), json!("text"));
        assert_eq!(scalar_from_param(&json!({"type": "string", "example": "bob"})), json!("bob"));
    }

    #[test]
    fn test_serialize_json_is_compact() {
        let body = json!({"a": 1, "b": ["x"]});
        assert_eq!(serialize_body("application/json", &body), r#"{"a":1,"b":["x"]}"#);
        assert_eq!(
            serialize_body("application/vnd.api+json", &json!("text")),
            "\"text\""
        );
    }

    #[test]
    fn test_serialize_form_encodes_objects() {
        let body = json!({"user": "a b", "email": "user@example.com", "age": 5});
        assert_eq!(
            serialize_body("application/x-www-form-urlencoded", &body),
            "user=a+b&email=user%40example.com&age=5"
        );
        assert_eq!(
            serialize_body("application/x-www-form-urlencoded", &json!("raw=1")),
            "raw=1"
        );
    }

    #[test]
    fn test_serialize_unknown_type_falls_back_to_json() {
        let body = json!({"id": 5});
        assert_eq!(serialize_body("application/xml", &body), r#"{"id":5}"#);
    }

    #[test]
    fn test_last_ref_name() {
        assert_eq!(last_ref_name("#/components/schemas/Pet"), "Pet");
        assert_eq!(last_ref_name("#/definitions/Pet/"), "Pet");
        assert_eq!(last_ref_name(""), "");
    }
}

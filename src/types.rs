//! Core types for the field-flattening engine.

use serde::Serialize;
use serde_json::Value;

/// HTTP method names recognized under a path entry (lowercase).
pub const HTTP_METHODS: &[&str] = &[
    "get", "post", "put", "delete", "patch", "head", "options", "trace",
];

/// Display name for a root-level field with no dotted path.
pub const ROOT_FIELD_NAME: &str = "(root)";

/// Returns the JSON type name for display and diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One HTTP operation extracted from the document's path table.
///
/// Records are created once per document scan and sorted by
/// (path, method), so the listing is stable across reloads as long as
/// operation ids are stable.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    /// Stable identifier: `method:path`, or `method:path:operationId`
    /// when the operation declares one.
    pub id: String,
    /// Path template as written in the document (e.g. `/users/{id}`).
    pub path: String,
    /// Lower-cased HTTP method name.
    pub method: String,
    /// Tags declared on the operation; empty when absent.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Operation summary, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// The raw operation definition (parameters, requestBody, responses).
    #[serde(skip_serializing)]
    pub operation: Value,
}

/// One flattened field produced for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Dotted name path (`user.address.city`); `(root)` for a
    /// root-level non-object schema.
    pub name: String,
    /// Rendered one-line type description.
    #[serde(rename = "type")]
    pub type_name: String,
    /// True only if every enclosing object on the path requires it.
    pub required: bool,
    /// Field description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Classification of a schema node by its dominant keyword family.
///
/// Precedence mirrors the flattener's traversal order: a `$ref` wins
/// over composition, composition over the explicit type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaShape<'a> {
    /// Node carries a `$ref` pointer.
    Reference(&'a str),
    /// Node carries a non-empty `allOf` composition.
    AllOf(&'a [Value]),
    /// Node carries a non-empty `oneOf` or `anyOf` composition.
    Union(&'a [Value]),
    /// `type: array`.
    Array,
    /// `type: object`, or untyped with a properties map.
    Object,
    /// Any other explicit type tag (`string`, `integer`, ...).
    Primitive(&'a str),
    /// No recognizable schema keywords.
    Unknown,
}

/// Classify a schema node.
///
/// Non-object nodes and nodes with wrong-typed keywords classify as
/// `Unknown`; callers degrade rather than erroring.
pub fn classify(node: &Value) -> SchemaShape<'_> {
    let Some(map) = node.as_object() else {
        return SchemaShape::Unknown;
    };

    if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
        return SchemaShape::Reference(pointer);
    }

    if let Some(members) = non_empty_list(map.get("allOf")) {
        return SchemaShape::AllOf(members);
    }
    for key in ["oneOf", "anyOf"] {
        if let Some(members) = non_empty_list(map.get(key)) {
            return SchemaShape::Union(members);
        }
    }

    match map.get("type").and_then(Value::as_str) {
        Some("array") => SchemaShape::Array,
        Some("object") => SchemaShape::Object,
        Some(type_name) => SchemaShape::Primitive(type_name),
        None if map.get("properties").is_some_and(Value::is_object) => SchemaShape::Object,
        None => SchemaShape::Unknown,
    }
}

fn non_empty_list(value: Option<&Value>) -> Option<&[Value]> {
    value
        .and_then(Value::as_array)
        .filter(|members| !members.is_empty())
        .map(Vec::as_slice)
}

//! Type rendering - one-line textual descriptions of schema nodes.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::resolver::{ref_type_name, resolve_ref};

/// Render a schema node as a one-line type description.
///
/// The node is resolved one reference hop first, so callers may pass
/// `$ref` nodes directly; a pointer that survives resolution (external
/// file, missing target, or an indirect chain) renders as its trailing
/// path segment. Total over any input; malformed nodes render as
/// `unknown`.
///
/// 64-bit integers (`format: int64`/`uint64`) render as `string`,
/// matching the convention of transmitting them as strings so JSON
/// consumers don't lose precision. This is a display convention, not
/// spec-accurate typing.
pub fn render_type(document: &Value, node: &Value) -> String {
    render_node(document, node, &mut HashSet::new())
}

fn render_node(document: &Value, node: &Value, visited: &mut HashSet<String>) -> String {
    // Guard against reference cycles reachable through items, map
    // values, and composition members; a revisited pointer renders as
    // its bare name.
    let pointer = node.get("$ref").and_then(Value::as_str).map(String::from);
    if let Some(pointer) = &pointer {
        if !visited.insert(pointer.clone()) {
            return ref_type_name(pointer).to_string();
        }
    }

    let resolved = resolve_ref(document, node);
    let rendered = match resolved.as_object() {
        Some(map) => render_resolved(document, map, visited),
        None => "unknown".to_string(),
    };

    if let Some(pointer) = &pointer {
        visited.remove(pointer);
    }
    rendered
}

fn render_resolved(document: &Value, map: &Map<String, Value>, visited: &mut HashSet<String>) -> String {
    match map.get("type").and_then(Value::as_str) {
        Some("integer") if is_wide_integer(map) => "string".to_string(),
        Some("array") => {
            let items = match map.get("items") {
                Some(items) => render_node(document, items, visited),
                None => "unknown".to_string(),
            };
            format!("{}[]", items)
        }
        Some("object") => match map.get("additionalProperties") {
            Some(values) if values.is_object() => {
                format!("map<string, {}>", render_node(document, values, visited))
            }
            _ => "object".to_string(),
        },
        Some("string") if has_enum(map) => render_enum(map),
        Some(type_name) => match map.get("format").and_then(Value::as_str) {
            Some(format) => format!("{}({})", type_name, format),
            None => type_name.to_string(),
        },
        None => render_untyped(document, map, visited),
    }
}

/// Nodes without a type tag: composition, bare objects, and pointers
/// left unresolved.
fn render_untyped(document: &Value, map: &Map<String, Value>, visited: &mut HashSet<String>) -> String {
    if let Some(members) = composition(map, "allOf") {
        return join_members(document, members, " & ", visited);
    }
    for key in ["oneOf", "anyOf"] {
        if let Some(members) = composition(map, key) {
            return join_members(document, members, " | ", visited);
        }
    }
    if map.get("properties").is_some_and(Value::is_object) {
        return "object".to_string();
    }
    if let Some(pointer) = map.get("$ref").and_then(Value::as_str) {
        return ref_type_name(pointer).to_string();
    }
    "unknown".to_string()
}

fn composition<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    map.get(key)
        .and_then(Value::as_array)
        .filter(|members| !members.is_empty())
        .map(Vec::as_slice)
}

fn join_members(
    document: &Value,
    members: &[Value],
    separator: &str,
    visited: &mut HashSet<String>,
) -> String {
    members
        .iter()
        .map(|member| render_node(document, member, visited))
        .collect::<Vec<_>>()
        .join(separator)
}

fn is_wide_integer(map: &Map<String, Value>) -> bool {
    matches!(
        map.get("format").and_then(Value::as_str),
        Some("int64") | Some("uint64")
    )
}

fn has_enum(map: &Map<String, Value>) -> bool {
    map.get("enum")
        .and_then(Value::as_array)
        .is_some_and(|values| !values.is_empty())
}

fn render_enum(map: &Map<String, Value>) -> String {
    let rendered: Vec<String> = map
        .get("enum")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(enum_value)
        .collect();
    format!("string(enum: {})", rendered.join(", "))
}

fn enum_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

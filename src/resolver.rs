//! Reference resolution against the document root.
//!
//! OpenAPI documents point at shared definitions with fragment-style
//! `$ref` pointers (`#/components/schemas/Pet` in OpenAPI 3,
//! `#/definitions/Pet` in Swagger 2). Resolution is a single hop: the
//! pointer is replaced by its target, shallow-merged so that sibling
//! keywords written next to the `$ref` override the target's keywords of
//! the same name. Callers needing deep resolution invoke it again on the
//! result if a pointer remains.

use serde_json::Value;

/// Navigate a fragment-style JSON Pointer (e.g. `#/components/schemas/Pet`).
///
/// Returns `None` when any path segment is missing. Segments are
/// unescaped per RFC 6901 (`~1` = `/`, `~0` = `~`). An empty path
/// returns the document root.
pub fn navigate_pointer<'a>(document: &'a Value, fragment: &str) -> Option<&'a Value> {
    let path = fragment.trim_start_matches('#').trim_start_matches('/');
    if path.is_empty() {
        return Some(document);
    }

    let mut current = document;
    for part in path.split('/') {
        let key = part.replace("~1", "/").replace("~0", "~");
        current = current.get(&key)?;
    }
    Some(current)
}

/// Trailing path segment of a reference pointer.
///
/// Used as an opaque type name for pointers the resolver cannot follow:
/// `./common.json#/components/schemas/Pet` names `Pet`.
pub fn ref_type_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

/// Resolve a schema node's `$ref` one hop against the document.
///
/// Only document-internal pointers (`#/...`) are followed. On success
/// the returned node is the target with the node's sibling keywords
/// merged over it (siblings win on collision) and `$ref` removed.
/// External pointers, a bare `#`, a non-string `$ref`, and pointers with
/// no target all leave the node unchanged.
///
/// Pure function of (document, node); never errors.
pub fn resolve_ref(document: &Value, node: &Value) -> Value {
    let Some(map) = node.as_object() else {
        return node.clone();
    };
    let Some(pointer) = map.get("$ref").and_then(Value::as_str) else {
        return node.clone();
    };
    if !pointer.starts_with("#/") {
        return node.clone();
    }
    let Some(target) = navigate_pointer(document, pointer) else {
        return node.clone();
    };

    let mut merged = match target.as_object() {
        Some(target) => target.clone(),
        // A non-object target has nothing to merge with; it replaces
        // the node outright.
        None => return target.clone(),
    };
    for (key, value) in map {
        if key != "$ref" {
            merged.insert(key.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

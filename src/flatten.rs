//! Field flattening - walks an object schema into dotted leaf fields.
//!
//! The walk expands references and `allOf` members in place, emits
//! `oneOf`/`anyOf` unions as single entries, and descends into object
//! properties while AND-ing required-ness down the containment chain.
//! Arrays are never expanded element-by-element; the element type is
//! folded into the rendered type string (`user.tags: string[]`).

use std::collections::HashSet;

use serde_json::Value;

use crate::render::render_type;
use crate::resolver::resolve_ref;
use crate::types::{classify, FieldDescriptor, SchemaShape, ROOT_FIELD_NAME};

/// Flatten a schema into an ordered list of leaf field descriptors.
///
/// `required` is the required-ness of the schema itself as seen by its
/// caller; a field is required overall only if every enclosing object on
/// its path marks it required and the root was required to begin with.
///
/// Termination on self- and mutually-recursive schemas comes from a
/// per-path set of visited `$ref` pointers: a reference already being
/// expanded on the current path is not expanded again, while the same
/// reference on a sibling branch is expanded independently.
pub fn flatten_fields(document: &Value, schema: &Value, required: bool) -> Vec<FieldDescriptor> {
    let mut fields = Vec::new();
    walk(
        document,
        schema,
        "",
        required,
        &mut HashSet::new(),
        &mut fields,
    );
    fields
}

fn walk(
    document: &Value,
    node: &Value,
    prefix: &str,
    required: bool,
    visited: &mut HashSet<String>,
    fields: &mut Vec<FieldDescriptor>,
) {
    match classify(node) {
        SchemaShape::Reference(pointer) => {
            if visited.contains(pointer) {
                // Cycle on this path; nothing further to emit.
                return;
            }
            let resolved = resolve_ref(document, node);
            if resolved.get("$ref").and_then(Value::as_str) == Some(pointer) {
                // Pointer the resolver cannot follow; keep the field as
                // an opaque leaf.
                emit(document, node, prefix, required, fields);
                return;
            }
            visited.insert(pointer.to_string());
            walk(document, &resolved, prefix, required, visited, fields);
            visited.remove(pointer);
        }

        SchemaShape::AllOf(members) => {
            // Merge by path: members contribute fields at the same
            // prefix, identical paths describing the same field.
            for member in members {
                walk(document, member, prefix, required, visited, fields);
            }
        }

        SchemaShape::Union(members) => {
            let rendered: Vec<String> = members
                .iter()
                .map(|member| render_type(document, member))
                .collect();
            fields.push(FieldDescriptor {
                name: display_name(prefix),
                type_name: rendered.join(" | "),
                required,
                description: description_of(node),
            });
        }

        SchemaShape::Object => {
            let properties = node
                .get("properties")
                .and_then(Value::as_object)
                .filter(|properties| !properties.is_empty());
            let Some(properties) = properties else {
                // No declared properties: a map or bare object is a leaf.
                emit(document, node, prefix, required, fields);
                return;
            };

            let required_names = required_names(node);
            for (name, child) in properties {
                let child_required = required && required_names.contains(&name.as_str());
                let child_prefix = join_path(prefix, name);
                let resolved = resolve_ref(document, child);
                if is_leaf(&resolved) || is_array(&resolved) {
                    emit(document, &resolved, &child_prefix, child_required, fields);
                } else {
                    // Object-typed, property-carrying, or still a
                    // reference: descend.
                    walk(document, child, &child_prefix, child_required, visited, fields);
                }
            }
        }

        SchemaShape::Array | SchemaShape::Primitive(_) | SchemaShape::Unknown => {
            emit(document, node, prefix, required, fields);
        }
    }
}

/// A leaf never needs descending: no reference, no property map, and a
/// type tag that is neither `object` nor `array`.
fn is_leaf(node: &Value) -> bool {
    node.get("$ref").and_then(Value::as_str).is_none()
        && !node.get("properties").is_some_and(Value::is_object)
        && !matches!(
            node.get("type").and_then(Value::as_str),
            Some("object") | Some("array")
        )
}

fn is_array(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("array")
}

fn emit(
    document: &Value,
    node: &Value,
    prefix: &str,
    required: bool,
    fields: &mut Vec<FieldDescriptor>,
) {
    fields.push(FieldDescriptor {
        name: display_name(prefix),
        type_name: render_type(document, node),
        required,
        description: description_of(node),
    });
}

fn display_name(prefix: &str) -> String {
    if prefix.is_empty() {
        ROOT_FIELD_NAME.to_string()
    } else {
        prefix.to_string()
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn description_of(node: &Value) -> Option<String> {
    node.get("description")
        .and_then(Value::as_str)
        .map(String::from)
}

fn required_names(node: &Value) -> Vec<&str> {
    node.get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

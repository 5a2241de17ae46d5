//! Report assembly - one text block per selected operation.
//!
//! Each block holds a `METHOD /path` header, optional summary and tags
//! lines, the declared request parameters grouped by location, the
//! flattened JSON request body, and the flattened primary response body.

use serde_json::Value;

use crate::flatten::flatten_fields;
use crate::render::render_type;
use crate::types::{FieldDescriptor, OperationRecord};

/// Section label for request parameters.
const REQUEST_HEADER: &str = "请求参数:";
/// Section label for the primary response body.
const RESPONSE_HEADER: &str = "响应参数:";
/// Label prefixing the tags line.
const TAGS_LABEL: &str = "标签: ";
/// Marker appended to required fields.
const REQUIRED_MARK: &str = "(必填)";
/// Placeholder for a section with nothing to list.
const NONE_PLACEHOLDER: &str = "无";

/// Exact JSON media types accepted for bodies, in preference order;
/// `application/*+json` wildcards rank after these.
const JSON_MEDIA_TYPES: &[&str] = &["application/json", "*/*"];

/// Response status entries tried in order for the primary response;
/// falls back to the first declared response.
const RESPONSE_PREFERENCE: &[&str] = &["200", "201", "default"];

/// Build the text report for an ordered selection of operations.
///
/// One block per operation, blocks separated by a blank line, trailing
/// whitespace trimmed from the report as a whole. An empty selection
/// yields an empty string. Pure; all degradation is textual (`unknown`
/// types, placeholder lines), never an error.
pub fn build_report(document: &Value, operations: &[OperationRecord]) -> String {
    let blocks: Vec<String> = operations
        .iter()
        .map(|record| build_block(document, record))
        .collect();
    blocks.join("\n\n").trim_end().to_string()
}

fn build_block(document: &Value, record: &OperationRecord) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{} {}", record.method.to_uppercase(), record.path));
    if let Some(summary) = &record.summary {
        lines.push(summary.clone());
    }
    if !record.tags.is_empty() {
        lines.push(format!("{}{}", TAGS_LABEL, record.tags.join(", ")));
    }

    lines.push(REQUEST_HEADER.to_string());
    let request = request_lines(document, &record.operation);
    if request.is_empty() {
        lines.push(NONE_PLACEHOLDER.to_string());
    } else {
        lines.extend(request);
    }

    lines.push(RESPONSE_HEADER.to_string());
    match response_schema(&record.operation) {
        Some(schema) => lines.extend(schema_lines(document, schema)),
        None => lines.push(NONE_PLACEHOLDER.to_string()),
    }

    lines.join("\n")
}

/// Declared parameters grouped by location (locations sorted by name,
/// parameters in declaration order), followed by the flattened JSON
/// request body as a trailing `body` location.
fn request_lines(document: &Value, operation: &Value) -> Vec<String> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();

    if let Some(parameters) = operation.get("parameters").and_then(Value::as_array) {
        for parameter in parameters {
            let Some(name) = parameter.get("name").and_then(Value::as_str) else {
                continue;
            };
            let location = parameter
                .get("in")
                .and_then(Value::as_str)
                .unwrap_or("query");
            // OpenAPI 3 wraps the type in `schema`; Swagger 2 declares
            // it inline on the parameter itself.
            let schema = parameter.get("schema").unwrap_or(parameter);
            let line = field_line(
                name,
                &render_type(document, schema),
                parameter
                    .get("required")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                parameter.get("description").and_then(Value::as_str),
            );

            match groups.iter_mut().find(|(group, _)| group.as_str() == location) {
                Some((_, lines)) => lines.push(line),
                None => groups.push((location.to_string(), vec![line])),
            }
        }
    }
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let mut lines = Vec::new();
    for (location, parameter_lines) in groups {
        lines.push(format!("[{}]", location));
        lines.extend(parameter_lines);
    }

    if let Some(schema) = request_body_schema(operation) {
        lines.push("[body]".to_string());
        lines.extend(schema_lines(document, schema));
    }

    lines
}

fn request_body_schema(operation: &Value) -> Option<&Value> {
    let content = operation.get("requestBody")?.get("content")?;
    json_content_schema(content)
}

/// Pick the schema of the JSON media entry from a content map:
/// `application/json`, then `*/*`, then any `application/*+json`.
fn json_content_schema(content: &Value) -> Option<&Value> {
    let content = content.as_object()?;

    for media_type in JSON_MEDIA_TYPES {
        if let Some(schema) = content.get(*media_type).and_then(|media| media.get("schema")) {
            return Some(schema);
        }
    }
    content.iter().find_map(|(media_type, media)| {
        if media_type.starts_with("application/") && media_type.ends_with("+json") {
            media.get("schema")
        } else {
            None
        }
    })
}

/// The response to document: `200`, `201`, `default`, then the first
/// declared response. Its schema comes from the JSON content entry, or
/// from the response's bare `schema` member (Swagger 2).
fn response_schema(operation: &Value) -> Option<&Value> {
    let responses = operation.get("responses")?.as_object()?;
    let response = RESPONSE_PREFERENCE
        .iter()
        .find_map(|status| responses.get(*status))
        .or_else(|| responses.values().next())?;

    if let Some(schema) = response.get("content").and_then(json_content_schema) {
        return Some(schema);
    }
    response.get("schema")
}

/// Flattened field lines for a body schema; a schema that flattens to
/// nothing falls back to its rendered type on a single line.
fn schema_lines(document: &Value, schema: &Value) -> Vec<String> {
    let fields = flatten_fields(document, schema, true);
    if fields.is_empty() {
        return vec![render_type(document, schema)];
    }
    fields.iter().map(descriptor_line).collect()
}

fn descriptor_line(field: &FieldDescriptor) -> String {
    field_line(
        &field.name,
        &field.type_name,
        field.required,
        field.description.as_deref(),
    )
}

fn field_line(name: &str, type_name: &str, required: bool, description: Option<&str>) -> String {
    let mut line = format!("{}: {}", name, type_name);
    if required {
        line.push(' ');
        line.push_str(REQUIRED_MARK);
    }
    if let Some(description) = description {
        if !description.is_empty() {
            line.push(' ');
            line.push_str(description);
        }
    }
    line
}

//! Operation extraction from the document's path table.

use serde_json::Value;

use crate::types::{OperationRecord, HTTP_METHODS};

/// Scan the document's `paths` table and return one record per
/// (path, method) pair.
///
/// Keys under a path entry that match an HTTP method name
/// (case-insensitive) become records; other keys (shared `parameters`
/// lists, extensions) are ignored, and non-object path entries are
/// skipped without error. Records are sorted by path then method, both
/// lexicographic, so the output order depends only on the (path, method)
/// pairs and is stable across reloads.
pub fn extract_operations(document: &Value) -> Vec<OperationRecord> {
    let mut records = Vec::new();

    let Some(paths) = document.get("paths").and_then(Value::as_object) else {
        return records;
    };

    for (path, entry) in paths {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        for (key, operation) in entry {
            let method = key.to_lowercase();
            if !HTTP_METHODS.contains(&method.as_str()) || !operation.is_object() {
                continue;
            }

            let id = match operation.get("operationId").and_then(Value::as_str) {
                Some(operation_id) => format!("{}:{}:{}", method, path, operation_id),
                None => format!("{}:{}", method, path),
            };
            let tags = operation
                .get("tags")
                .and_then(Value::as_array)
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_str)
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default();
            let summary = operation
                .get("summary")
                .and_then(Value::as_str)
                .map(String::from);

            records.push(OperationRecord {
                id,
                path: path.clone(),
                method,
                tags,
                summary,
                operation: operation.clone(),
            });
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.method.cmp(&b.method)));
    records
}

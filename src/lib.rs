//! OpenAPI operation field reports.
//!
//! Flattens the request and response schemas of OpenAPI/Swagger
//! operations into readable field listings: dotted name paths, rendered
//! types, required markers, and descriptions. `$ref` pointers are
//! resolved against the document, composition keywords (`allOf`,
//! `oneOf`, `anyOf`) are merged, and recursive schemas terminate
//! through a per-path cycle guard.
//!
//! The document is consumed as untrusted `serde_json::Value` data:
//! missing and wrong-typed fields degrade to placeholder text instead
//! of erroring.
//!
//! # Example
//!
//! ```
//! use oas_fields::{build_report, extract_operations};
//! use serde_json::json;
//!
//! let document = json!({
//!     "openapi": "3.0.0",
//!     "paths": {
//!         "/users/{id}": {
//!             "get": {
//!                 "operationId": "getUser",
//!                 "parameters": [
//!                     { "name": "id", "in": "path", "required": true,
//!                       "schema": { "type": "string" } }
//!                 ],
//!                 "responses": {
//!                     "200": {
//!                         "content": {
//!                             "application/json": {
//!                                 "schema": {
//!                                     "type": "object",
//!                                     "required": ["id"],
//!                                     "properties": {
//!                                         "id": { "type": "string" },
//!                                         "age": { "type": "integer" }
//!                                     }
//!                                 }
//!                             }
//!                         }
//!                     }
//!                 }
//!             }
//!         }
//!     }
//! });
//!
//! let operations = extract_operations(&document);
//! assert_eq!(operations[0].id, "get:/users/{id}:getUser");
//!
//! let report = build_report(&document, &operations);
//! assert!(report.contains("id: string (必填)"));
//! assert!(report.contains("age: integer"));
//! ```

mod error;
mod flatten;
mod loader;
mod operations;
mod render;
mod report;
mod resolver;
mod types;

pub use error::LoadError;
pub use flatten::flatten_fields;
pub use loader::{is_url, load_document, load_document_auto, load_document_str};
pub use operations::extract_operations;
pub use render::render_type;
pub use report::build_report;
pub use resolver::{navigate_pointer, ref_type_name, resolve_ref};
pub use types::{
    classify, json_type_name, FieldDescriptor, OperationRecord, SchemaShape, HTTP_METHODS,
    ROOT_FIELD_NAME,
};

#[cfg(feature = "remote")]
pub use loader::load_document_url;

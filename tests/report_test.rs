//! Integration tests for operation extraction and report building.

use oas_fields::{build_report, extract_operations, flatten_fields, render_type};
use serde_json::{json, Value};

/// A document exercising refs, cycles, unions, and both body dialects.
fn petstore() -> Value {
    json!({
        "openapi": "3.0.0",
        "paths": {
            "/pets": {
                "get": {
                    "operationId": "listPets",
                    "summary": "List all pets",
                    "tags": ["pets"],
                    "parameters": [
                        { "name": "limit", "in": "query",
                          "schema": { "type": "integer", "format": "int32" },
                          "description": "Page size" }
                    ],
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/Pet" }
                                    }
                                }
                            }
                        }
                    }
                },
                "post": {
                    "operationId": "createPet",
                    "requestBody": {
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/NewPet" }
                            }
                        }
                    },
                    "responses": {
                        "201": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Pet" }
                                }
                            }
                        }
                    }
                }
            },
            "/categories": {
                "get": {
                    "responses": {
                        "200": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Category" }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Pet": {
                    "type": "object",
                    "required": ["id", "name"],
                    "properties": {
                        "id": { "type": "integer", "format": "int64" },
                        "name": { "type": "string", "description": "Display name" },
                        "tag": {
                            "oneOf": [{ "type": "string" }, { "type": "integer" }]
                        },
                        "category": { "$ref": "#/components/schemas/Category" }
                    }
                },
                "NewPet": {
                    "allOf": [
                        { "$ref": "#/components/schemas/Pet" },
                        {
                            "type": "object",
                            "properties": {
                                "notes": { "type": "string" }
                            }
                        }
                    ]
                },
                "Category": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": { "type": "string" },
                        "parent": { "$ref": "#/components/schemas/Category" }
                    }
                }
            }
        }
    })
}

// === Operation Extraction ===

mod extraction {
    use super::*;

    #[test]
    fn records_are_sorted_and_stable() {
        let doc = petstore();
        let first = extract_operations(&doc);
        let second = extract_operations(&doc);

        let ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "get:/categories",
                "get:/pets:listPets",
                "post:/pets:createPet"
            ]
        );
        assert_eq!(
            ids,
            second.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn order_ignores_document_key_order() {
        let shuffled = json!({
            "paths": {
                "/b": { "post": {}, "get": {} },
                "/a": { "get": {} }
            }
        });
        let ids: Vec<String> = extract_operations(&shuffled)
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, ["get:/a", "get:/b", "post:/b"]);
    }
}

// === Report Building ===

mod report {
    use super::*;

    #[test]
    fn end_to_end_users_example() {
        let doc = json!({
            "paths": {
                "/users/{id}": {
                    "get": {
                        "operationId": "getUser",
                        "parameters": [
                            { "name": "id", "in": "path", "required": true,
                              "schema": { "type": "string" } }
                        ],
                        "responses": {
                            "200": {
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "required": ["id"],
                                            "properties": {
                                                "id": { "type": "string" },
                                                "age": { "type": "integer" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let operations = extract_operations(&doc);
        assert_eq!(operations.len(), 1);
        assert_eq!(operations[0].id, "get:/users/{id}:getUser");

        let report = build_report(&doc, &operations);
        assert_eq!(
            report,
            "GET /users/{id}\n\
             请求参数:\n\
             [path]\n\
             id: string (必填)\n\
             响应参数:\n\
             id: string (必填)\n\
             age: integer"
        );
    }

    #[test]
    fn empty_selection_is_empty_text() {
        assert_eq!(build_report(&petstore(), &[]), "");
    }

    #[test]
    fn all_of_body_merges_referenced_fields() {
        let doc = petstore();
        let operations = extract_operations(&doc);
        let create = operations
            .iter()
            .find(|r| r.id == "post:/pets:createPet")
            .unwrap()
            .clone();

        let report = build_report(&doc, &[create]);

        // Fields from Pet (via the allOf ref) and the inline extension.
        assert!(report.contains("id: string (必填)"));
        assert!(report.contains("name: string (必填) Display name"));
        assert!(report.contains("tag: string | integer"));
        assert!(report.contains("notes: string"));
        // Category is self-recursive; its nested parent stops at the guard.
        assert!(report.contains("category.name: string"));
    }

    #[test]
    fn recursive_response_schema_terminates() {
        let doc = petstore();
        let operations = extract_operations(&doc);
        let categories = operations
            .iter()
            .find(|r| r.id == "get:/categories")
            .unwrap()
            .clone();

        let report = build_report(&doc, &[categories]);

        assert!(report.contains("name: string (必填)"));
        // Exactly one name line: the parent branch is cut, not repeated.
        assert_eq!(report.matches("name: string").count(), 1);
    }

    #[test]
    fn array_response_folds_into_type_strings() {
        let doc = petstore();
        let operations = extract_operations(&doc);
        let list = operations
            .iter()
            .find(|r| r.id == "get:/pets:listPets")
            .unwrap()
            .clone();

        let report = build_report(&doc, &[list]);

        assert!(report.contains("limit: integer(int32) Page size"));
        // The array response is a single root-marker entry, one line per
        // element field is never produced. The element ref resolves one
        // hop to Pet's object body.
        assert!(report.contains("(root): object[]"));
    }

    #[test]
    fn selection_order_is_preserved() {
        let doc = petstore();
        let operations = extract_operations(&doc);
        let mut reversed: Vec<_> = operations.clone();
        reversed.reverse();

        let report = build_report(&doc, &reversed);
        let create = report.find("POST /pets").unwrap();
        let categories = report.find("GET /categories").unwrap();
        assert!(create < categories);
    }
}

// === Flattening Through the Public Surface ===

mod flattening {
    use super::*;

    #[test]
    fn required_needs_the_whole_chain() {
        let doc = petstore();
        let schema = json!({
            "type": "object",
            "properties": {
                "pet": { "$ref": "#/components/schemas/Pet" }
            }
        });

        let fields = flatten_fields(&doc, &schema, true);
        let id = fields.iter().find(|f| f.name == "pet.id").unwrap();
        // Pet requires id, but pet itself is optional here.
        assert!(!id.required);
    }

    #[test]
    fn wide_integers_render_as_strings() {
        let doc = petstore();
        assert_eq!(
            render_type(&doc, &json!({ "$ref": "#/components/schemas/Pet" })),
            "object"
        );
        let fields = flatten_fields(
            &doc,
            &json!({ "$ref": "#/components/schemas/Pet" }),
            true,
        );
        let id = fields.iter().find(|f| f.name == "id").unwrap();
        assert_eq!(id.type_name, "string");
    }
}

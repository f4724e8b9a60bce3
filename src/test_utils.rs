//! Shared test utilities for unit and command tests.
//!
//! Builders for schema IR trees, test IR nodes, and API documents, plus
//! temp-file helpers for command execution tests.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::e2e::document::{Document, Endpoint, HttpMethod, Operation, Parameter};
use crate::e2e::ir::Expression;
use crate::schema::definition::{
    Application, File, ForeignField, GinIndex, Model, PlainField, PlainFieldType, PlainIndex,
    PrimaryField, Relation, UniqueIndex,
};

/// Create a temporary file containing the given content.
///
/// Used to feed JSON IR files to command execute tests.
pub fn create_temp_json_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

// =============================================================================
// Schema IR builders
// =============================================================================

pub fn application(files: Vec<File>) -> Application {
    Application { files }
}

pub fn file(filename: &str, models: Vec<Model>) -> File {
    File {
        filename: filename.to_string(),
        namespace: "Default".to_string(),
        models,
    }
}

/// A model with an `id` primary key and nothing else.
pub fn model(name: &str) -> Model {
    Model {
        name: name.to_string(),
        description: String::new(),
        material: false,
        primary_field: PrimaryField {
            name: "id".to_string(),
            description: String::new(),
        },
        foreign_fields: vec![],
        plain_fields: vec![],
        unique_indexes: vec![],
        plain_indexes: vec![],
        gin_indexes: vec![],
    }
}

pub fn foreign(name: &str, relation: &str, target: &str) -> ForeignField {
    ForeignField {
        name: name.to_string(),
        description: String::new(),
        nullable: false,
        unique: false,
        relation: Relation {
            name: relation.to_string(),
            target_model: target.to_string(),
            mapping_name: None,
        },
    }
}

pub fn plain(name: &str, field_type: PlainFieldType) -> PlainField {
    PlainField {
        name: name.to_string(),
        description: String::new(),
        nullable: false,
        field_type,
    }
}

fn names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

impl Model {
    pub fn foreign(mut self, field: ForeignField) -> Self {
        self.foreign_fields.push(field);
        self
    }

    pub fn plain(mut self, field: PlainField) -> Self {
        self.plain_fields.push(field);
        self
    }

    pub fn unique(mut self, fields: &[&str]) -> Self {
        self.unique_indexes.push(UniqueIndex { field_names: names(fields) });
        self
    }

    pub fn index(mut self, fields: &[&str]) -> Self {
        self.plain_indexes.push(PlainIndex { field_names: names(fields) });
        self
    }

    pub fn gin(mut self, field: &str) -> Self {
        self.gin_indexes.push(GinIndex { field_name: field.to_string() });
        self
    }
}

// =============================================================================
// Test IR builders
// =============================================================================

pub fn ident(text: &str) -> Expression {
    Expression::Identifier { text: text.to_string() }
}

pub fn string(value: &str) -> Expression {
    Expression::StringLiteral { value: value.to_string() }
}

pub fn number(value: f64) -> Expression {
    Expression::NumericLiteral { value }
}

pub fn endpoint(method: HttpMethod, path: &str) -> Endpoint {
    Endpoint {
        method,
        path: path.to_string(),
    }
}

pub fn operation(
    method: HttpMethod,
    path: &str,
    request_body: Option<&str>,
    response_body: Option<&str>,
) -> Operation {
    let parameters = path
        .split('/')
        .filter_map(|segment| segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
        .map(|name| Parameter {
            name: name.to_string(),
            type_name: "string".to_string(),
        })
        .collect();
    Operation {
        method,
        path: path.to_string(),
        name: None,
        parameters,
        request_body: request_body.map(str::to_string),
        response_body: response_body.map(str::to_string),
    }
}

/// A small shopping API used across compiler and assembler tests.
pub fn shopping_document() -> Document {
    Document {
        operations: vec![
            operation(HttpMethod::Post, "/shoppings/customers/sales", Some("IShoppingSale.ICreate"), Some("IShoppingSale")),
            operation(HttpMethod::Get, "/shoppings/customers/sales/{saleId}", None, Some("IShoppingSale")),
            operation(HttpMethod::Patch, "/shoppings/customers/sales", Some("IShoppingSale.IRequest"), Some("IPageIShoppingSale")),
            operation(HttpMethod::Put, "/shoppings/customers/sales/{saleId}", Some("IShoppingSale.IUpdate"), None),
            operation(HttpMethod::Delete, "/shoppings/customers/sales/{saleId}", None, None),
        ],
    }
}

// =============================================================================
// JSON inputs for command tests
// =============================================================================

/// One `User` model with a unique email.
pub const USER_SCHEMA_JSON: &str = r#"{
    "files": [{
        "filename": "user.prisma",
        "namespace": "Actors",
        "models": [{
            "name": "User",
            "description": "A registered user.",
            "primaryField": { "name": "id", "description": "Primary key." },
            "plainFields": [
                { "name": "email", "type": "string", "description": "Login email." }
            ],
            "uniqueIndexes": [{ "fieldNames": ["email"] }]
        }]
    }]
}"#;

/// Two violations: an index on a missing column and a dangling foreign key.
pub const INVALID_SCHEMA_JSON: &str = r#"{
    "files": [{
        "filename": "sale.prisma",
        "namespace": "Sales",
        "models": [{
            "name": "Sale",
            "primaryField": { "name": "id" },
            "foreignFields": [{
                "name": "customer_id",
                "relation": { "name": "customer", "targetModel": "Customer" }
            }],
            "plainIndexes": [{ "fieldNames": ["created_at"] }]
        }]
    }]
}"#;

pub const SHOPPING_DOCUMENT_JSON: &str = r#"{
    "operations": [
        {
            "method": "post",
            "path": "/shoppings/customers/sales",
            "requestBody": "IShoppingSale.ICreate",
            "responseBody": "IShoppingSale"
        },
        {
            "method": "get",
            "path": "/shoppings/customers/sales/{saleId}",
            "parameters": [{ "name": "saleId" }],
            "responseBody": "IShoppingSale"
        }
    ]
}"#;

/// Creates a sale, reads it back, and compares the two.
pub const SALE_TEST_CASE_JSON: &str = r#"{
    "scenario": {
        "functionName": "test_api_shopping_sale_create",
        "draft": "Create a sale and read it back.",
        "endpoint": { "method": "post", "path": "/shoppings/customers/sales" },
        "dependencies": [{ "method": "get", "path": "/shoppings/customers/sales/{saleId}" }]
    },
    "function": {
        "statements": [
            {
                "type": "apiOperateStatement",
                "endpoint": { "method": "post", "path": "/shoppings/customers/sales" },
                "argument": {
                    "type": "objectLiteralExpression",
                    "properties": [{
                        "name": "body",
                        "value": {
                            "type": "objectLiteralExpression",
                            "properties": [{
                                "name": "title",
                                "value": { "type": "keywordRandom", "keyword": "paragraph" }
                            }]
                        }
                    }]
                },
                "variableName": "sale"
            },
            {
                "type": "apiOperateStatement",
                "endpoint": { "method": "get", "path": "/shoppings/customers/sales/{saleId}" },
                "argument": {
                    "type": "propertyAccessExpression",
                    "expression": { "type": "identifier", "text": "sale" },
                    "name": "id"
                },
                "variableName": "read"
            },
            {
                "type": "expressionStatement",
                "expression": {
                    "type": "equalPredicate",
                    "title": "read sale",
                    "x": { "type": "identifier", "text": "sale" },
                    "y": { "type": "identifier", "text": "read" }
                }
            }
        ]
    }
}"#;

//! Core schema IR types.
//!
//! A backend-agnostic description of a relational application: files own
//! models, models own fields and indexes. The JSON shape (camelCase keys)
//! matches what the upstream schema agents emit.

use serde::{Deserialize, Serialize};

/// Logical column type of a plain field.
///
/// Maps to the Prisma scalar via `logical_type()` and to the postgres native
/// type attribute via `postgres_type()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlainFieldType {
    Boolean,
    Int,
    Double,
    String,
    Datetime,
    Uuid,
    Uri,
}

impl PlainFieldType {
    /// Returns the Prisma scalar type name for this field type.
    pub fn logical_type(&self) -> &'static str {
        match self {
            PlainFieldType::Boolean => "Boolean",
            PlainFieldType::Int => "Int",
            PlainFieldType::Double => "Float",
            PlainFieldType::String => "String",
            PlainFieldType::Datetime => "DateTime",
            PlainFieldType::Uuid => "String",
            PlainFieldType::Uri => "String",
        }
    }

    /// Returns the postgres native type attribute, if the type needs one.
    pub fn postgres_type(&self) -> Option<&'static str> {
        match self {
            PlainFieldType::Int => Some("@db.Integer"),
            PlainFieldType::Double => Some("@db.DoublePrecision"),
            PlainFieldType::Uuid => Some("@db.Uuid"),
            PlainFieldType::Datetime => Some("@db.Timestamptz"),
            PlainFieldType::Uri => Some("@db.VarChar(80000)"),
            PlainFieldType::Boolean | PlainFieldType::String => None,
        }
    }
}

/// Whole application: an ordered list of schema files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub files: Vec<File>,
}

/// One schema file (e.g. `schema-02-actors.prisma`) grouping related models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub filename: String,
    pub namespace: String,
    #[serde(default)]
    pub models: Vec<Model>,
}

/// A database table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Materialized view or other generated model; skips the namespace tag.
    #[serde(default)]
    pub material: bool,
    pub primary_field: PrimaryField,
    #[serde(default)]
    pub foreign_fields: Vec<ForeignField>,
    #[serde(default)]
    pub plain_fields: Vec<PlainField>,
    #[serde(default)]
    pub unique_indexes: Vec<UniqueIndex>,
    #[serde(default)]
    pub plain_indexes: Vec<PlainIndex>,
    #[serde(default)]
    pub gin_indexes: Vec<GinIndex>,
}

impl Model {
    /// Names of every column (primary, foreign, plain) in declaration order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_field.name.as_str())
            .chain(self.foreign_fields.iter().map(|f| f.name.as_str()))
            .chain(self.plain_fields.iter().map(|f| f.name.as_str()))
    }

    /// Returns true if any column is named `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_names().any(|c| c == name)
    }

    /// Total number of columns.
    pub fn column_count(&self) -> usize {
        1 + self.foreign_fields.len() + self.plain_fields.len()
    }
}

/// Primary key column; always a string UUID rendered with `@id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryField {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Foreign key column referencing another model's primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignField {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub unique: bool,
    pub relation: Relation,
}

/// Navigation property generated for a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    /// Property name on the owning model (e.g. `customer`)
    pub name: String,
    pub target_model: String,
    /// Disambiguating relation name, assigned by the writer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping_name: Option<String>,
}

/// Ordinary data column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainField {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(rename = "type")]
    pub field_type: PlainFieldType,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueIndex {
    pub field_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainIndex {
    pub field_names: Vec<String>,
}

/// Trigram index over a single string column (postgres only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GinIndex {
    pub field_name: String,
}

//! Schema IR validation.
//!
//! Every rule runs to completion and appends to a shared error list; nothing
//! exits early. The caller is a self-correction loop that pays for each round,
//! so it receives the full set of findings at once.
//!
//! # Phases
//!
//! 1. `normalize_primary_indexes` builds a copy of the input with indexes led
//!    by the primary key removed (the primary key is already indexed).
//! 2. A `ModelDictionary` is built once over the normalized copy.
//! 3. Rule passes: duplicates, indexes, references.

mod duplicates;
mod indexes;
mod references;

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::schema::definition::{Application, File, Model};

/// A single validation finding.
///
/// `path` is a dot-path into the IR rooted at `application`, e.g.
/// `application.files[0].models[2].plainIndexes[1].fieldNames[0]`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{path}: {message}")]
pub struct SchemaError {
    pub path: String,
    pub table: Option<String>,
    pub field: Option<String>,
    pub message: String,
}

impl SchemaError {
    pub fn new(
        path: impl Into<String>,
        table: Option<&str>,
        field: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            table: table.map(str::to_string),
            field: field.map(str::to_string),
            message: message.into(),
        }
    }
}

/// Validate a schema application.
///
/// Returns the normalized copy on success. On failure every violation found
/// is returned; the caller's IR is never mutated.
pub fn validate_schema(app: &Application) -> Result<Application, Vec<SchemaError>> {
    let normalized = normalize_primary_indexes(app);

    let mut errors = Vec::new();
    duplicates::validate_duplicated_files(&normalized, &mut errors);

    let dict = ModelDictionary::new(&normalized);
    duplicates::validate_duplicated_models(&dict, &mut errors);
    duplicates::validate_duplicated_fields(&dict, &mut errors);
    indexes::validate_indexes(&dict, &mut errors);
    references::validate_references(&dict, &mut errors);

    debug!(
        files = normalized.files.len(),
        models = dict.len(),
        errors = errors.len(),
        "validated schema application"
    );

    if errors.is_empty() {
        Ok(normalized)
    } else {
        Err(errors)
    }
}

/// Return a copy of `app` without indexes whose first column is the primary key.
///
/// GIN indexes over the primary key are dropped as well.
pub fn normalize_primary_indexes(app: &Application) -> Application {
    let mut normalized = app.clone();
    let mut removed = 0usize;

    for model in normalized.files.iter_mut().flat_map(|f| f.models.iter_mut()) {
        let primary = model.primary_field.name.clone();
        let leads_with_primary =
            |names: &[String]| names.first().is_some_and(|first| *first == primary);

        let before = model.unique_indexes.len() + model.plain_indexes.len() + model.gin_indexes.len();
        model.unique_indexes.retain(|u| !leads_with_primary(&u.field_names));
        model.plain_indexes.retain(|p| !leads_with_primary(&p.field_names));
        model.gin_indexes.retain(|g| g.field_name != primary);
        let after = model.unique_indexes.len() + model.plain_indexes.len() + model.gin_indexes.len();
        removed += before - after;
    }

    if removed > 0 {
        debug!(removed, "dropped indexes led by a primary key");
    }
    normalized
}

/// Position of a model inside the application, with borrowed views.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ModelEntry<'a> {
    pub file_index: usize,
    pub model_index: usize,
    pub file: &'a File,
    pub model: &'a Model,
}

impl ModelEntry<'_> {
    /// Dot-path of this model, e.g. `application.files[1].models[0]`.
    pub fn path(&self) -> String {
        model_path(self.file_index, self.model_index)
    }

    pub fn table(&self) -> Option<&str> {
        Some(self.model.name.as_str())
    }
}

/// Lookup from model name to every model declared under that name.
///
/// Built once per validation. Entries keep declaration order so error output
/// is deterministic.
pub(crate) struct ModelDictionary<'a> {
    entries: Vec<ModelEntry<'a>>,
    by_name: HashMap<&'a str, Vec<usize>>,
}

impl<'a> ModelDictionary<'a> {
    pub fn new(app: &'a Application) -> Self {
        let mut entries = Vec::new();
        let mut by_name: HashMap<&'a str, Vec<usize>> = HashMap::new();

        for (file_index, file) in app.files.iter().enumerate() {
            for (model_index, model) in file.models.iter().enumerate() {
                by_name
                    .entry(model.name.as_str())
                    .or_default()
                    .push(entries.len());
                entries.push(ModelEntry {
                    file_index,
                    model_index,
                    file,
                    model,
                });
            }
        }

        Self { entries, by_name }
    }

    pub fn entries(&self) -> &[ModelEntry<'a>] {
        &self.entries
    }

    /// Every model declared as `name`, in declaration order.
    pub fn get(&self, name: &str) -> Vec<ModelEntry<'a>> {
        self.by_name
            .get(name)
            .map(|ids| ids.iter().map(|&i| self.entries[i]).collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Distinct model names, sorted.
    pub fn names(&self) -> Vec<&'a str> {
        let mut names: Vec<_> = self.by_name.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(crate) fn model_path(file_index: usize, model_index: usize) -> String {
    format!("application.files[{}].models[{}]", file_index, model_index)
}

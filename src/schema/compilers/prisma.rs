//! Prisma schema compiler.
//!
//! Produces one `.prisma` text per IR file plus `main.prisma`. Each model is
//! laid out as:
//!
//! ```prisma
//! /// Description.
//! ///
//! /// @namespace Sales
//! /// @author ir_compiler
//! model orders {
//!   //----
//!   // COLUMNS
//!   //----
//!   id String @id @db.Uuid
//!
//!   customer_id String @db.Uuid
//!
//!   //----
//!   // RELATIONS
//!   //----
//!   customer customers @relation(fields: [customer_id], references: [id], onDelete: Cascade)
//!
//!   @@index([customer_id])
//! }
//! ```

use std::collections::BTreeMap;

use tracing::debug;

use super::dialect::{Dbms, MAIN_FILE};
use crate::schema::definition::{Application, File, ForeignField, Model, PlainField, PrimaryField};
use crate::schema::relations::assign_mapping_names;
use crate::utils::{indent_lines, paddle, triple_slash_comment};

/// Author tag written into every model comment unless overridden.
pub const DEFAULT_AUTHOR: &str = "ir_compiler";

/// Compiler for generating Prisma schema text from the schema IR.
#[derive(Debug, Clone)]
pub struct PrismaCompiler {
    dbms: Dbms,
    author: String,
}

/// An inferred "has" side of a relation, found on the target model.
struct HasRelation<'a> {
    model_name: &'a str,
    unique: bool,
    mapping_name: Option<&'a str>,
}

impl PrismaCompiler {
    pub fn new(dbms: Dbms) -> Self {
        Self {
            dbms,
            author: DEFAULT_AUTHOR.to_string(),
        }
    }

    /// Override the `@author` tag.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn dbms(&self) -> Dbms {
        self.dbms
    }

    /// Compile every file of `app`, plus `main.prisma`.
    ///
    /// Mapping names are assigned on an internal copy; `app` is not modified.
    pub fn compile(&self, app: &Application) -> BTreeMap<String, String> {
        let app = assign_mapping_names(app);

        let mut files = BTreeMap::new();
        for file in &app.files {
            files.insert(file.filename.clone(), self.compile_file(&app, file));
        }
        files.insert(MAIN_FILE.to_string(), self.dbms.main_prisma().to_string());

        debug!(dbms = ?self.dbms, files = files.len(), "compiled prisma schema");
        files
    }

    /// Compile a single file. `app` must already carry mapping names.
    pub fn compile_file(&self, app: &Application, file: &File) -> String {
        let models: Vec<Vec<String>> = file
            .models
            .iter()
            .map(|model| self.compile_model(app, file, model))
            .collect();
        let mut text = paddle(models).join("\n");
        text.push('\n');
        text
    }

    /// Generate the full block for one model, comment included.
    pub fn compile_model(&self, app: &Application, file: &File, model: &Model) -> Vec<String> {
        let mut lines = self.model_comment(file, model);
        lines.push(format!("model {} {{", model.name));
        let body = paddle(vec![self.columns(model), self.relations(app, model)]);
        lines.extend(indent_lines(&body, 1));
        lines.push("}".to_string());
        lines
    }

    fn model_comment(&self, file: &File, model: &Model) -> Vec<String> {
        let mut tags = Vec::new();
        if !model.material {
            tags.push(format!("@namespace {}", file.namespace));
        }
        tags.push(format!("@author {}", self.author));

        let text = if model.description.trim().is_empty() {
            tags.join("\n")
        } else {
            format!("{}\n\n{}", model.description.trim_end(), tags.join("\n"))
        };
        triple_slash_comment(&text)
    }

    fn columns(&self, model: &Model) -> Vec<String> {
        let mut groups = vec![self.primary_column(&model.primary_field)];
        groups.extend(model.foreign_fields.iter().map(|f| self.foreign_column(f)));
        groups.extend(model.plain_fields.iter().map(|f| self.plain_column(f)));

        let mut lines = section_header("COLUMNS");
        lines.extend(paddle(groups));
        lines
    }

    fn primary_column(&self, field: &PrimaryField) -> Vec<String> {
        let mut lines = triple_slash_comment(&field.description);
        lines.push(join_words([
            Some(field.name.as_str()),
            Some("String"),
            Some("@id"),
            self.dbms.key_type(),
        ]));
        lines
    }

    fn foreign_column(&self, field: &ForeignField) -> Vec<String> {
        let logical = if field.nullable { "String?" } else { "String" };
        let mut lines = triple_slash_comment(&field.description);
        lines.push(join_words([
            Some(field.name.as_str()),
            Some(logical),
            self.dbms.key_type(),
        ]));
        lines
    }

    fn plain_column(&self, field: &PlainField) -> Vec<String> {
        let logical = format!(
            "{}{}",
            field.field_type.logical_type(),
            if field.nullable { "?" } else { "" }
        );
        let mut lines = triple_slash_comment(&field.description);
        lines.push(join_words([
            Some(field.name.as_str()),
            Some(logical.as_str()),
            self.dbms.physical_type(field.field_type),
        ]));
        lines
    }

    fn relations(&self, app: &Application, model: &Model) -> Vec<String> {
        let constraints: Vec<String> = model
            .foreign_fields
            .iter()
            .map(|f| self.constraint(f))
            .collect();

        let has: Vec<String> = has_relations(app, &model.name)
            .iter()
            .map(|h| {
                let name = h.mapping_name.unwrap_or(h.model_name);
                let arity = if h.unique { "?" } else { "[]" };
                match h.mapping_name {
                    Some(mapping) => format!("{} {}{} @relation(\"{}\")", name, h.model_name, arity, mapping),
                    None => format!("{} {}{}", name, h.model_name, arity),
                }
            })
            .collect();

        let foreign_indexes: Vec<String> = model
            .foreign_fields
            .iter()
            .filter(|f| !is_foreign_key_indexed(model, f))
            .map(|f| {
                if f.unique {
                    format!("@@unique([{}])", f.name)
                } else {
                    format!("@@index([{}])", f.name)
                }
            })
            .collect();

        let mut indexes: Vec<String> = model
            .unique_indexes
            .iter()
            .map(|u| format!("@@unique([{}])", u.field_names.join(", ")))
            .collect();
        indexes.extend(
            model
                .plain_indexes
                .iter()
                .map(|p| format!("@@index([{}])", p.field_names.join(", "))),
        );
        if self.dbms.supports_gin() {
            indexes.extend(model.gin_indexes.iter().map(|g| {
                format!("@@index([{}(ops: raw(\"gin_trgm_ops\"))], type: Gin)", g.field_name)
            }));
        }

        let body = paddle(vec![constraints, has, foreign_indexes, indexes]);
        if body.is_empty() {
            return body;
        }
        let mut lines = section_header("RELATIONS");
        lines.extend(body);
        lines
    }

    fn constraint(&self, field: &ForeignField) -> String {
        let relation = &field.relation;
        let mapping = relation
            .mapping_name
            .as_ref()
            .map(|m| format!("\"{}\", ", m))
            .unwrap_or_default();
        format!(
            "{} {}{} @relation({}fields: [{}], references: [id], onDelete: Cascade)",
            relation.name,
            relation.target_model,
            if field.nullable { "?" } else { "" },
            mapping,
            field.name
        )
    }
}

fn section_header(title: &str) -> Vec<String> {
    vec!["//----".to_string(), format!("// {}", title), "//----".to_string()]
}

fn join_words<'a, const N: usize>(words: [Option<&'a str>; N]) -> String {
    words.into_iter().flatten().collect::<Vec<_>>().join(" ")
}

// Every foreign field in the application that targets `target`.
fn has_relations<'a>(app: &'a Application, target: &str) -> Vec<HasRelation<'a>> {
    app.files
        .iter()
        .flat_map(|f| f.models.iter())
        .flat_map(|m| m.foreign_fields.iter().map(move |f| (m, f)))
        .filter(|(_, f)| f.relation.target_model == target)
        .map(|(m, f)| HasRelation {
            model_name: &m.name,
            unique: f.unique,
            mapping_name: f.relation.mapping_name.as_deref(),
        })
        .collect()
}

// A unique foreign key is covered by a single-column unique index on it; a
// plain foreign key by any index that starts with it.
fn is_foreign_key_indexed(model: &Model, field: &ForeignField) -> bool {
    if field.unique {
        return model
            .unique_indexes
            .iter()
            .any(|u| u.field_names.len() == 1 && u.field_names[0] == field.name);
    }
    let leads = |names: &[String]| names.first().is_some_and(|n| *n == field.name);
    model.unique_indexes.iter().any(|u| leads(&u.field_names))
        || model.plain_indexes.iter().any(|p| leads(&p.field_names))
}

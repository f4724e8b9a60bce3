//! Index rules: column existence, GIN column types, duplicates and redundancy.

use std::collections::BTreeMap;

use super::{ModelDictionary, ModelEntry, SchemaError};
use crate::schema::definition::PlainFieldType;

/// Which index list an index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexKind {
    Unique,
    Plain,
}

impl IndexKind {
    fn accessor(&self) -> &'static str {
        match self {
            IndexKind::Unique => "uniqueIndexes",
            IndexKind::Plain => "plainIndexes",
        }
    }
}

/// A btree index (unique or plain) flattened for comparison.
struct IndexRef<'a> {
    kind: IndexKind,
    position: usize,
    field_names: &'a [String],
}

impl IndexRef<'_> {
    fn path(&self, base: &str) -> String {
        format!("{}.{}[{}].fieldNames", base, self.kind.accessor(), self.position)
    }

    /// True if `other` is a strict prefix of this index's columns.
    fn extends(&self, other: &IndexRef) -> bool {
        other.field_names.len() < self.field_names.len()
            && self.field_names.starts_with(other.field_names)
    }
}

pub(super) fn validate_indexes(dict: &ModelDictionary, errors: &mut Vec<SchemaError>) {
    for entry in dict.entries() {
        let indexes = collect_indexes(entry);
        validate_index_columns(entry, &indexes, errors);
        validate_gin_indexes(entry, errors);
        validate_duplicated_indexes(entry, &indexes, errors);
        validate_redundant_unique_indexes(entry, &indexes, errors);
        validate_redundant_plain_indexes(entry, &indexes, errors);
    }
}

fn collect_indexes<'a>(entry: &ModelEntry<'a>) -> Vec<IndexRef<'a>> {
    let model = entry.model;
    let unique = model
        .unique_indexes
        .iter()
        .enumerate()
        .map(|(position, u)| IndexRef {
            kind: IndexKind::Unique,
            position,
            field_names: &u.field_names,
        });
    let plain = model
        .plain_indexes
        .iter()
        .enumerate()
        .map(|(position, p)| IndexRef {
            kind: IndexKind::Plain,
            position,
            field_names: &p.field_names,
        });
    unique.chain(plain).collect()
}

// Every column named by an index must exist on the model, once.
fn validate_index_columns(entry: &ModelEntry, indexes: &[IndexRef], errors: &mut Vec<SchemaError>) {
    let model = entry.model;
    let base = entry.path();

    for index in indexes {
        let path = index.path(&base);
        if index.field_names.is_empty() {
            errors.push(SchemaError::new(
                path.clone(),
                entry.table(),
                None,
                format!(
                    "Index on model \"{}\" has no columns. List at least one column or remove the index.",
                    model.name
                ),
            ));
            continue;
        }

        for (i, name) in index.field_names.iter().enumerate() {
            if !model.has_column(name) {
                errors.push(SchemaError::new(
                    format!("{}[{}]", path, i),
                    entry.table(),
                    Some(name.as_str()),
                    format!(
                        "Column \"{}\" does not exist in model \"{}\". Available columns: {}.",
                        name,
                        model.name,
                        model.column_names().collect::<Vec<_>>().join(", ")
                    ),
                ));
            } else if index.field_names[..i].contains(name) {
                errors.push(SchemaError::new(
                    format!("{}[{}]", path, i),
                    entry.table(),
                    Some(name.as_str()),
                    format!(
                        "Column \"{}\" is listed more than once in the same index of model \"{}\".",
                        name, model.name
                    ),
                ));
            }
        }
    }
}

// GIN indexes only apply to plain string columns.
fn validate_gin_indexes(entry: &ModelEntry, errors: &mut Vec<SchemaError>) {
    let model = entry.model;
    let base = entry.path();

    for (i, gin) in model.gin_indexes.iter().enumerate() {
        let path = format!("{}.ginIndexes[{}].fieldName", base, i);
        let field = Some(gin.field_name.as_str());

        match model.plain_fields.iter().find(|p| p.name == gin.field_name) {
            Some(plain) if plain.field_type == PlainFieldType::String => {}
            Some(plain) => errors.push(SchemaError::new(
                path,
                entry.table(),
                field,
                format!(
                    "GIN index on \"{}.{}\" targets a column of type \"{}\". \
                     GIN (trigram) indexes only support string columns; use a plain index instead.",
                    model.name,
                    gin.field_name,
                    plain.field_type.logical_type()
                ),
            )),
            None if model.has_column(&gin.field_name) => errors.push(SchemaError::new(
                path,
                entry.table(),
                field,
                format!(
                    "GIN index on \"{}.{}\" targets a key column. \
                     GIN indexes only support plain string columns.",
                    model.name, gin.field_name
                ),
            )),
            None => errors.push(SchemaError::new(
                path,
                entry.table(),
                field,
                format!(
                    "Column \"{}\" does not exist in model \"{}\". Available plain columns: {}.",
                    gin.field_name,
                    model.name,
                    model
                        .plain_fields
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            )),
        }
    }
}

// Two btree indexes over the same column list, or two GIN indexes over the
// same column, are duplicates.
fn validate_duplicated_indexes(entry: &ModelEntry, indexes: &[IndexRef], errors: &mut Vec<SchemaError>) {
    let model = entry.model;
    let base = entry.path();

    let mut groups: BTreeMap<&[String], Vec<&IndexRef>> = BTreeMap::new();
    for index in indexes.iter().filter(|i| !i.field_names.is_empty()) {
        groups.entry(index.field_names).or_default().push(index);
    }
    for (fields, members) in groups.iter().filter(|(_, m)| m.len() > 1) {
        for member in members {
            let path = member.path(&base);
            let others = members
                .iter()
                .map(|m| m.path(&base))
                .filter(|p| *p != path)
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(SchemaError::new(
                path,
                entry.table(),
                None,
                format!(
                    "Index ({}) of model \"{}\" is duplicated by {}. Keep only one of them.",
                    fields.join(", "),
                    model.name,
                    others
                ),
            ));
        }
    }

    let mut gins: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (i, gin) in model.gin_indexes.iter().enumerate() {
        gins.entry(gin.field_name.as_str()).or_default().push(i);
    }
    for (field, positions) in gins.iter().filter(|(_, p)| p.len() > 1) {
        for &position in positions {
            let others = positions
                .iter()
                .filter(|&&p| p != position)
                .map(|p| format!("{}.ginIndexes[{}]", base, p))
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(SchemaError::new(
                format!("{}.ginIndexes[{}].fieldName", base, position),
                entry.table(),
                Some(*field),
                format!(
                    "GIN index on \"{}.{}\" is duplicated by {}. Keep only one of them.",
                    model.name, field, others
                ),
            ));
        }
    }
}

// A unique index is redundant when it starts with a column that is already
// unique on its own (a unique foreign key, alone or leading a combination), or
// when another unique index is a strict prefix of it.
fn validate_redundant_unique_indexes(
    entry: &ModelEntry,
    indexes: &[IndexRef],
    errors: &mut Vec<SchemaError>,
) {
    let model = entry.model;
    let base = entry.path();
    let uniques: Vec<_> = indexes.iter().filter(|i| i.kind == IndexKind::Unique).collect();

    for index in &uniques {
        let led_by_unique_key = index.field_names.first().filter(|first| {
            model.foreign_fields.iter().any(|f| f.unique && f.name == **first)
        });
        if let Some(first) = led_by_unique_key {
            errors.push(SchemaError::new(
                index.path(&base),
                entry.table(),
                Some(first.as_str()),
                format!(
                    "Unique index ({}) of model \"{}\" is redundant: its first column \"{}\" \
                     is a unique foreign key, which is already unique on its own. \
                     Remove the index or make the foreign key non-unique.",
                    index.field_names.join(", "),
                    model.name,
                    first
                ),
            ));
        }

        for other in uniques.iter().filter(|o| index.extends(o)) {
            errors.push(SchemaError::new(
                index.path(&base),
                entry.table(),
                None,
                format!(
                    "Unique index ({}) of model \"{}\" is redundant: {} ({}) is already unique \
                     on a prefix of its columns. Remove one of the two indexes.",
                    index.field_names.join(", "),
                    model.name,
                    other.path(&base),
                    other.field_names.join(", ")
                ),
            ));
        }
    }
}

// A plain index that is a strict prefix of another plain index is covered by it.
fn validate_redundant_plain_indexes(
    entry: &ModelEntry,
    indexes: &[IndexRef],
    errors: &mut Vec<SchemaError>,
) {
    let model = entry.model;
    let base = entry.path();
    let plains: Vec<_> = indexes.iter().filter(|i| i.kind == IndexKind::Plain).collect();

    for index in plains.iter().filter(|i| !i.field_names.is_empty()) {
        for other in plains.iter().filter(|o| o.extends(index)) {
            errors.push(SchemaError::new(
                index.path(&base),
                entry.table(),
                None,
                format!(
                    "Plain index ({}) of model \"{}\" is redundant: it is a prefix of {} ({}), \
                     which already serves the same lookups. Remove it.",
                    index.field_names.join(", "),
                    model.name,
                    other.path(&base),
                    other.field_names.join(", ")
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::{Application, ForeignField, GinIndex, UniqueIndex};
    use crate::test_utils::{application, file, foreign, model, plain};
    use rstest::rstest;

    fn run(app: &Application) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        validate_indexes(&ModelDictionary::new(app), &mut errors);
        errors
    }

    fn paths(errors: &[SchemaError]) -> Vec<&str> {
        errors.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_missing_index_column_has_exact_path() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order")
                .plain(plain("code", PlainFieldType::String))
                .unique(&["code", "nope"])],
        )]);

        let errors = run(&app);
        assert_eq!(
            paths(&errors),
            vec!["application.files[0].models[0].uniqueIndexes[0].fieldNames[1]"]
        );
        assert_eq!(errors[0].field.as_deref(), Some("nope"));
        assert!(errors[0].message.contains("Available columns: id, code"));
    }

    #[test]
    fn test_index_may_reference_every_column_kind() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order")
                .foreign(foreign("customer_id", "customer", "Customer"))
                .plain(plain("created_at", PlainFieldType::Datetime))
                .index(&["customer_id", "created_at"])],
        )]);

        assert!(run(&app).is_empty());
    }

    #[test]
    fn test_empty_index() {
        let app = application(vec![file("a.prisma", vec![model("Order").index(&[])])]);

        let errors = run(&app);
        assert_eq!(paths(&errors), vec!["application.files[0].models[0].plainIndexes[0].fieldNames"]);
    }

    #[test]
    fn test_repeated_column_in_index() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order")
                .plain(plain("code", PlainFieldType::String))
                .index(&["code", "code"])],
        )]);

        let errors = run(&app);
        assert_eq!(
            paths(&errors),
            vec!["application.files[0].models[0].plainIndexes[0].fieldNames[1]"]
        );
    }

    #[rstest]
    #[case(PlainFieldType::Int)]
    #[case(PlainFieldType::Uuid)]
    #[case(PlainFieldType::Datetime)]
    fn test_gin_rejects_non_string(#[case] ty: PlainFieldType) {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order").plain(plain("value", ty)).gin("value")],
        )]);

        let errors = run(&app);
        assert_eq!(paths(&errors), vec!["application.files[0].models[0].ginIndexes[0].fieldName"]);
        assert!(errors[0].message.contains("only support string"));
    }

    #[test]
    fn test_gin_on_key_column_and_missing_column() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order")
                .foreign(foreign("customer_id", "customer", "Customer"))
                .gin("customer_id")
                .gin("ghost")],
        )]);

        let errors = run(&app);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("key column"));
        assert!(errors[1].message.contains("does not exist"));
    }

    #[test]
    fn test_gin_on_string_passes() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order").plain(plain("title", PlainFieldType::String)).gin("title")],
        )]);

        assert!(run(&app).is_empty());
    }

    #[test]
    fn test_duplicated_index_sets_across_kinds() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order")
                .plain(plain("a", PlainFieldType::String))
                .plain(plain("b", PlainFieldType::String))
                .unique(&["a", "b"])
                .index(&["a", "b"])],
        )]);

        let errors = run(&app);
        assert_eq!(
            paths(&errors),
            vec![
                "application.files[0].models[0].uniqueIndexes[0].fieldNames",
                "application.files[0].models[0].plainIndexes[0].fieldNames",
            ]
        );
        assert!(errors[0].message.contains("plainIndexes[0]"));
    }

    #[test]
    fn test_duplicated_gin_indexes() {
        let mut order = model("Order").plain(plain("title", PlainFieldType::String));
        order.gin_indexes = vec![
            GinIndex { field_name: "title".to_string() },
            GinIndex { field_name: "title".to_string() },
        ];
        let app = application(vec![file("a.prisma", vec![order])]);

        let errors = run(&app);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].path, "application.files[0].models[0].ginIndexes[1].fieldName");
    }

    #[test]
    fn test_unique_index_led_by_unique_foreign_key() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Profile")
                .foreign(ForeignField {
                    unique: true,
                    ..foreign("user_id", "user", "User")
                })
                .plain(plain("nickname", PlainFieldType::String))
                .unique(&["user_id", "nickname"])],
        )]);

        let errors = run(&app);
        assert_eq!(paths(&errors), vec!["application.files[0].models[0].uniqueIndexes[0].fieldNames"]);
        assert_eq!(errors[0].field.as_deref(), Some("user_id"));
    }

    #[test]
    fn test_single_column_unique_on_unique_foreign_key() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Profile")
                .foreign(ForeignField {
                    unique: true,
                    ..foreign("user_id", "user", "User")
                })
                .unique(&["user_id"])],
        )]);

        let errors = run(&app);
        assert_eq!(paths(&errors), vec!["application.files[0].models[0].uniqueIndexes[0].fieldNames"]);
        assert_eq!(errors[0].field.as_deref(), Some("user_id"));
        assert!(errors[0].message.contains("Unique index (user_id)"));
    }

    #[test]
    fn test_unique_index_extending_another_unique_index() {
        let mut order = model("Order")
            .plain(plain("a", PlainFieldType::String))
            .plain(plain("b", PlainFieldType::String));
        order.unique_indexes = vec![
            UniqueIndex { field_names: vec!["a".to_string(), "b".to_string()] },
            UniqueIndex { field_names: vec!["a".to_string()] },
        ];
        let app = application(vec![file("a.prisma", vec![order])]);

        let errors = run(&app);
        assert_eq!(paths(&errors), vec!["application.files[0].models[0].uniqueIndexes[0].fieldNames"]);
        assert!(errors[0].message.contains("uniqueIndexes[1]"));
    }

    #[test]
    fn test_plain_index_prefix_of_another() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order")
                .plain(plain("a", PlainFieldType::String))
                .plain(plain("b", PlainFieldType::String))
                .index(&["a"])
                .index(&["a", "b"])
                .index(&["b", "a"])],
        )]);

        let errors = run(&app);
        assert_eq!(paths(&errors), vec!["application.files[0].models[0].plainIndexes[0].fieldNames"]);
        assert!(errors[0].message.contains("plainIndexes[1]"));
    }
}

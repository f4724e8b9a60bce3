//! Name uniqueness rules: files, models, and fields within a model.

use std::collections::BTreeMap;

use super::{ModelDictionary, SchemaError};
use crate::schema::definition::Application;

// Every file sharing a filename gets an error listing the others.
pub(super) fn validate_duplicated_files(app: &Application, errors: &mut Vec<SchemaError>) {
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, file) in app.files.iter().enumerate() {
        groups.entry(file.filename.as_str()).or_default().push(index);
    }

    for (filename, indices) in groups.iter().filter(|(_, v)| v.len() > 1) {
        for &index in indices {
            let others = indices
                .iter()
                .filter(|&&other| other != index)
                .map(|other| format!("application.files[{}]", other))
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(SchemaError::new(
                format!("application.files[{}].filename", index),
                None,
                None,
                format!(
                    "File name \"{}\" is duplicated. Other files with the same name: {}. \
                     Merge them into one file or rename all but one.",
                    filename, others
                ),
            ));
        }
    }
}

// Model names are global across files.
pub(super) fn validate_duplicated_models(dict: &ModelDictionary, errors: &mut Vec<SchemaError>) {
    for entry in dict.entries() {
        let siblings = dict.get(&entry.model.name);
        if siblings.len() < 2 {
            continue;
        }

        let others = siblings
            .iter()
            .filter(|s| s.file_index != entry.file_index || s.model_index != entry.model_index)
            .map(|s| format!("{} (file \"{}\")", s.path(), s.file.filename))
            .collect::<Vec<_>>()
            .join(", ");
        errors.push(SchemaError::new(
            format!("{}.name", entry.path()),
            entry.table(),
            None,
            format!(
                "Model name \"{}\" is duplicated. Other models with the same name: {}. \
                 Model names must be unique across all files; remove the duplicate or rename it.",
                entry.model.name, others
            ),
        ));
    }
}

// Field names must be unique within a model across primary, foreign and plain
// fields. A plain field named after another model is flagged as a likely
// denormalized copy of that model.
pub(super) fn validate_duplicated_fields(dict: &ModelDictionary, errors: &mut Vec<SchemaError>) {
    for entry in dict.entries() {
        let model = entry.model;
        let base = entry.path();

        let mut accessors: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        accessors
            .entry(model.primary_field.name.as_str())
            .or_default()
            .push(format!("{}.primaryField.name", base));
        for (i, field) in model.foreign_fields.iter().enumerate() {
            accessors
                .entry(field.name.as_str())
                .or_default()
                .push(format!("{}.foreignFields[{}].name", base, i));
        }
        for (i, field) in model.plain_fields.iter().enumerate() {
            accessors
                .entry(field.name.as_str())
                .or_default()
                .push(format!("{}.plainFields[{}].name", base, i));
        }

        for (name, paths) in accessors.iter().filter(|(_, v)| v.len() > 1) {
            for path in paths {
                let others = paths
                    .iter()
                    .filter(|p| *p != path)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(SchemaError::new(
                    path.clone(),
                    entry.table(),
                    Some(*name),
                    format!(
                        "Field \"{}\" is declared more than once in model \"{}\". \
                         Other declarations: {}. Keep one and rename or remove the rest.",
                        name, model.name, others
                    ),
                ));
            }
        }

        for (i, field) in model.plain_fields.iter().enumerate() {
            if field.name == model.name || !dict.contains(&field.name) {
                continue;
            }
            errors.push(SchemaError::new(
                format!("{}.plainFields[{}].name", base, i),
                entry.table(),
                Some(field.name.as_str()),
                format!(
                    "Plain field \"{}\" of model \"{}\" has the same name as model \"{}\". \
                     This usually means data of that model is copied here (denormalization). \
                     Reference it through a foreign field instead, or rename the column.",
                    field.name, model.name, field.name
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{application, file, foreign, model, plain};
    use crate::schema::definition::PlainFieldType;

    fn run(app: &Application) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        validate_duplicated_files(app, &mut errors);
        let dict = ModelDictionary::new(app);
        validate_duplicated_models(&dict, &mut errors);
        validate_duplicated_fields(&dict, &mut errors);
        errors
    }

    #[test]
    fn test_duplicated_files_list_siblings() {
        let app = application(vec![
            file("a.prisma", vec![]),
            file("a.prisma", vec![]),
            file("a.prisma", vec![]),
        ]);

        let errors = run(&app);
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0].path, "application.files[0].filename");
        assert!(errors[0].message.contains("application.files[1], application.files[2]"));
        assert!(errors[2].message.contains("application.files[0], application.files[1]"));
    }

    #[test]
    fn test_duplicated_models_across_files() {
        let app = application(vec![
            file("a.prisma", vec![model("Order")]),
            file("b.prisma", vec![model("Order")]),
        ]);

        let errors = run(&app);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].path, "application.files[0].models[0].name");
        assert_eq!(errors[0].table.as_deref(), Some("Order"));
        assert!(errors[0].message.contains("application.files[1].models[0]"));
        assert_eq!(errors[1].path, "application.files[1].models[0].name");
        assert!(errors[1].message.contains("application.files[0].models[0]"));
    }

    #[test]
    fn test_duplicated_fields_across_kinds() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order")
                .foreign(foreign("id", "customer", "Customer"))
                .plain(plain("id", PlainFieldType::String))],
        )]);

        let errors = run(&app);
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "application.files[0].models[0].primaryField.name",
                "application.files[0].models[0].foreignFields[0].name",
                "application.files[0].models[0].plainFields[0].name",
            ]
        );
        assert!(errors.iter().all(|e| e.field.as_deref() == Some("id")));
    }

    #[test]
    fn test_plain_field_named_after_model() {
        let app = application(vec![file(
            "a.prisma",
            vec![
                model("Customer"),
                model("Order").plain(plain("Customer", PlainFieldType::String)),
            ],
        )]);

        let errors = run(&app);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "application.files[0].models[1].plainFields[0].name");
        assert!(errors[0].message.contains("denormalization"));
    }

    #[test]
    fn test_unique_names_pass() {
        let app = application(vec![file(
            "a.prisma",
            vec![
                model("Customer").plain(plain("name", PlainFieldType::String)),
                model("Order").foreign(foreign("customer_id", "customer", "Customer")),
            ],
        )]);

        assert!(run(&app).is_empty());
    }
}

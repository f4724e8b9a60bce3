//! Foreign key rules: target existence and direct two-model cycles.
//!
//! Only the simple bidirectional case (A -> B -> A) is detected. Longer chains
//! such as A -> B -> C -> A pass validation.

use super::{ModelDictionary, SchemaError};

pub(super) fn validate_references(dict: &ModelDictionary, errors: &mut Vec<SchemaError>) {
    for entry in dict.entries() {
        let model = entry.model;
        let base = entry.path();

        for (i, foreign) in model.foreign_fields.iter().enumerate() {
            let path = format!("{}.foreignFields[{}].relation.targetModel", base, i);
            let target_name = &foreign.relation.target_model;

            let targets = dict.get(target_name);
            let Some(target) = targets.first() else {
                errors.push(SchemaError::new(
                    path,
                    entry.table(),
                    Some(foreign.name.as_str()),
                    format!(
                        "Foreign field \"{}.{}\" references model \"{}\", which does not exist. \
                         Existing models: {}.",
                        model.name,
                        foreign.name,
                        target_name,
                        dict.names().join(", ")
                    ),
                ));
                continue;
            };

            // Self references are allowed (trees, threads).
            if target.model.name == model.name {
                continue;
            }

            for (j, opposite) in target.model.foreign_fields.iter().enumerate() {
                if opposite.relation.target_model != model.name {
                    continue;
                }
                errors.push(SchemaError::new(
                    path.clone(),
                    entry.table(),
                    Some(foreign.name.as_str()),
                    format!(
                        "Cross reference between \"{}\" and \"{}\": \"{}.{}\" references \"{}\" \
                         while {}.foreignFields[{}] (\"{}.{}\") references \"{}\" back. \
                         This circular dependency makes both rows impossible to create. \
                         Keep the foreign key on only one side, or move the relationship \
                         into a separate junction model.",
                        model.name,
                        target.model.name,
                        model.name,
                        foreign.name,
                        target.model.name,
                        target.path(),
                        j,
                        target.model.name,
                        opposite.name,
                        model.name
                    ),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::definition::Application;
    use crate::test_utils::{application, file, foreign, model};

    fn run(app: &Application) -> Vec<SchemaError> {
        let mut errors = Vec::new();
        validate_references(&ModelDictionary::new(app), &mut errors);
        errors
    }

    #[test]
    fn test_missing_target_model() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Order").foreign(foreign("customer_id", "customer", "Customer"))],
        )]);

        let errors = run(&app);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].path,
            "application.files[0].models[0].foreignFields[0].relation.targetModel"
        );
        assert_eq!(errors[0].field.as_deref(), Some("customer_id"));
        assert!(errors[0].message.contains("Existing models: Order"));
    }

    #[test]
    fn test_mutual_references_reported_on_both_sides() {
        let app = application(vec![
            file("a.prisma", vec![model("A").foreign(foreign("b_id", "b", "B"))]),
            file("b.prisma", vec![model("B").foreign(foreign("a_id", "a", "A"))]),
        ]);

        let errors = run(&app);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].path,
            "application.files[0].models[0].foreignFields[0].relation.targetModel"
        );
        assert!(errors[0].message.contains("application.files[1].models[0].foreignFields[0]"));
        assert!(errors[1].message.contains("application.files[0].models[0].foreignFields[0]"));
    }

    #[test]
    fn test_self_reference_is_allowed() {
        let app = application(vec![file(
            "a.prisma",
            vec![model("Category").foreign(foreign("parent_id", "parent", "Category"))],
        )]);

        assert!(run(&app).is_empty());
    }

    #[test]
    fn test_longer_cycles_are_not_detected() {
        let app = application(vec![file(
            "a.prisma",
            vec![
                model("A").foreign(foreign("b_id", "b", "B")),
                model("B").foreign(foreign("c_id", "c", "C")),
                model("C").foreign(foreign("a_id", "a", "A")),
            ],
        )]);

        assert!(run(&app).is_empty());
    }
}

//! Relation mapping names.
//!
//! Prisma needs a relation name whenever two relations between the same pair
//! of models would otherwise be ambiguous. The writer runs this pass before
//! emission; it works on a copy and leaves the caller's IR untouched.

use std::collections::HashMap;

use crate::schema::definition::Application;

/// Mapping name given to a model's single self-reference.
pub const RECURSIVE_MAPPING: &str = "recursive";

/// Return a copy of `app` with `relation.mapping_name` assigned.
///
/// - Foreign fields of one model sharing a target model get `<Model>_of_<field>`.
/// - A lone self-referencing foreign field gets `recursive`.
///
/// Any mapping name already present on the input is replaced.
pub fn assign_mapping_names(app: &Application) -> Application {
    let mut mapped = app.clone();

    for model in mapped.files.iter_mut().flat_map(|f| f.models.iter_mut()) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for foreign in &model.foreign_fields {
            *counts.entry(foreign.relation.target_model.clone()).or_default() += 1;
        }

        let model_name = model.name.clone();
        for foreign in model.foreign_fields.iter_mut() {
            let shared = counts
                .get(&foreign.relation.target_model)
                .is_some_and(|&count| count > 1);
            foreign.relation.mapping_name = if shared {
                Some(format!("{}_of_{}", model_name, foreign.name))
            } else if foreign.relation.target_model == model_name {
                Some(RECURSIVE_MAPPING.to_string())
            } else {
                None
            };
        }
    }

    mapped
}

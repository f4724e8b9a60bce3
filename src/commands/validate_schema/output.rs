//! Output formatting for validate-schema results.

use super::execute::ValidateSchemaResult;
use crate::output::{format_findings, Outputable};

impl Outputable for ValidateSchemaResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!(
            "Schema '{}' ({} file(s), {} model(s))",
            self.input, self.files, self.models
        )];
        lines.push(String::new());

        if self.valid {
            lines.push("No violations found.".to_string());
        } else {
            lines.push(format!("Found {} violation(s):", self.errors.len()));
            lines.extend(format_findings(
                self.errors.iter().map(|e| (e.path.as_str(), e.message.as_str())),
            ));
        }

        lines.join("\n")
    }
}

//! Output formatting for validate-test results.

use super::execute::ValidateTestResult;
use crate::output::{format_findings, Outputable};

impl Outputable for ValidateTestResult {
    fn to_table(&self) -> String {
        let mut lines = vec![format!("Test function '{}'", self.function_name)];
        if !self.allowed.is_empty() {
            lines.push(format!("Allowed endpoints: {}", self.allowed.join(", ")));
        }
        lines.push(String::new());

        if self.valid {
            lines.push("No problems found.".to_string());
        } else {
            lines.push(format!("Found {} problem(s):", self.errors.len()));
            lines.extend(format_findings(
                self.errors.iter().map(|e| (e.path.as_str(), e.message.as_str())),
            ));
        }
        lines.join("\n")
    }
}

//! Output formatting for write-schema results.

use super::execute::WriteSchemaResult;
use crate::output::Outputable;

impl Outputable for WriteSchemaResult {
    /// A single file prints bare; several are each headed by their name.
    fn to_table(&self) -> String {
        if self.files.len() == 1 {
            if let Some(text) = self.files.values().next() {
                return text.trim_end().to_string();
            }
        }
        self.files
            .iter()
            .map(|(name, text)| format!("// ==> {} <==\n{}", name, text.trim_end()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

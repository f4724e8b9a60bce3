//! Output formatting for write-test results.

use super::execute::WriteTestResult;
use crate::output::Outputable;

impl Outputable for WriteTestResult {
    /// The generated source, unchanged.
    fn to_table(&self) -> String {
        self.content.trim_end().to_string()
    }
}

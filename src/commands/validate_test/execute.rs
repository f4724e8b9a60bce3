use std::error::Error;

use serde::Serialize;

use super::ValidateTestCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::e2e::{validate_test_function, Document, Endpoint, TestCase, TestError};
use crate::input::read_json;

/// Result of the validate-test command execution
#[derive(Debug, Default, Serialize)]
pub struct ValidateTestResult {
    pub function_name: String,
    pub allowed: Vec<String>,
    pub valid: bool,
    pub errors: Vec<TestError>,
}

impl Execute for ValidateTestCmd {
    type Output = ValidateTestResult;

    fn execute(self, _config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let document: Document = read_json(&self.document)?;
        let case: TestCase = read_json(&self.function)?;

        let allowed: Vec<Endpoint> = if self.endpoints.is_empty() {
            case.scenario.allowed_endpoints()
        } else {
            self.endpoints
        };

        let errors = validate_test_function(&case.function, &document, &allowed);
        Ok(ValidateTestResult {
            function_name: case.scenario.function_name,
            allowed: allowed.iter().map(|e| e.to_string()).collect(),
            valid: errors.is_none(),
            errors: errors.unwrap_or_default(),
        })
    }
}

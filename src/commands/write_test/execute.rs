use std::error::Error;

use serde::Serialize;

use super::WriteTestCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::e2e::{write_test_function_with, AssembleOptions, Document, TestCase};
use crate::input::read_json;

/// Result of the write-test command execution
#[derive(Debug, Serialize)]
pub struct WriteTestResult {
    pub function_name: String,
    pub filename: String,
    pub content: String,
}

impl Execute for WriteTestCmd {
    type Output = WriteTestResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let document: Document = read_json(&self.document)?;
        let case: TestCase = read_json(&self.function)?;

        let options = AssembleOptions {
            api_package: self
                .api_package
                .unwrap_or_else(|| config.test.api_package.clone()),
        };
        let content = write_test_function_with(&document, &case.function, &case.scenario, &options);

        Ok(WriteTestResult {
            filename: format!("{}.ts", case.scenario.function_name),
            function_name: case.scenario.function_name,
            content,
        })
    }
}

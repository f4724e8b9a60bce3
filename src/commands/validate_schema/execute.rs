use std::error::Error;

use serde::Serialize;

use super::ValidateSchemaCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::input::read_json;
use crate::schema::{validate_schema, Application, SchemaError};

/// Result of the validate-schema command execution
#[derive(Debug, Default, Serialize)]
pub struct ValidateSchemaResult {
    pub input: String,
    pub files: usize,
    pub models: usize,
    pub valid: bool,
    pub errors: Vec<SchemaError>,
}

impl Execute for ValidateSchemaCmd {
    type Output = ValidateSchemaResult;

    fn execute(self, _config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let app: Application = read_json(&self.input)?;

        let mut result = ValidateSchemaResult {
            input: self.input.display().to_string(),
            files: app.files.len(),
            models: app.files.iter().map(|f| f.models.len()).sum(),
            ..Default::default()
        };

        match validate_schema(&app) {
            Ok(_) => result.valid = true,
            Err(errors) => result.errors = errors,
        }

        Ok(result)
    }
}

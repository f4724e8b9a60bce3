use std::collections::BTreeMap;
use std::error::Error;

use serde::Serialize;

use super::WriteSchemaCmd;
use crate::commands::Execute;
use crate::config::ConfigFile;
use crate::input::{read_json, IrError};
use crate::schema::{validate_schema, Application, Dbms, PrismaCompiler};

/// Result of the write-schema command execution
#[derive(Debug, Serialize)]
pub struct WriteSchemaResult {
    pub dbms: Dbms,
    pub files: BTreeMap<String, String>,
}

impl Execute for WriteSchemaCmd {
    type Output = WriteSchemaResult;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>> {
        let app: Application = read_json(&self.input)?;

        // The writer trusts its input; never hand it an unvalidated IR.
        let app = validate_schema(&app).map_err(|errors| {
            tracing::warn!(errors = errors.len(), "refusing to write invalid schema");
            IrError::SchemaInvalid {
                count: errors.len(),
            }
        })?;

        let dbms = self.dbms.unwrap_or(config.schema.dbms);
        let mut files = PrismaCompiler::new(dbms)
            .with_author(config.schema.author.clone())
            .compile(&app);

        if let Some(name) = self.file {
            let text = files.remove(&name).ok_or_else(|| IrError::FileNotWritten {
                name: name.clone(),
                available: files.keys().cloned().collect::<Vec<_>>().join(", "),
            })?;
            files = BTreeMap::from([(name, text)]);
        }

        Ok(WriteSchemaResult { dbms, files })
    }
}

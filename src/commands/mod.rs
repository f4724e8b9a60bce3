//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing (`mod.rs`)
//! - The `Execute` implementation and its result type (`execute.rs`)
//! - The `Outputable` implementation for the result (`output.rs`)
//! - Macro-generated CLI parsing tests (`cli_tests.rs`)

mod validate_schema;
mod validate_test;
mod write_schema;
mod write_test;

pub use validate_schema::ValidateSchemaCmd;
pub use validate_test::ValidateTestCmd;
pub use write_schema::WriteSchemaCmd;
pub use write_test::WriteTestCmd;

use clap::Subcommand;
use std::error::Error;

use crate::config::ConfigFile;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute(self, config: &ConfigFile) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a schema IR and report every structural violation
    ValidateSchema(ValidateSchemaCmd),

    /// Validate a schema IR and print its Prisma schema files
    WriteSchema(WriteSchemaCmd),

    /// Check the API references of a test function IR
    ValidateTest(ValidateTestCmd),

    /// Compile a test function IR into a TypeScript test file
    WriteTest(WriteTestCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run(self, config: &ConfigFile, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::ValidateSchema(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::WriteSchema(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::ValidateTest(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::WriteTest(cmd) => {
                let result = cmd.execute(config)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().unwrap_or(&String::new())).into())
            }
        }
    }
}

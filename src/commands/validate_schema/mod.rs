mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

use crate::input::validate_file_exists;

/// Check a schema IR against every structural rule
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  ir_compiler validate-schema --input app.json             # Report all violations
  ir_compiler validate-schema -i app.json --format json    # Machine-readable errors")]
pub struct ValidateSchemaCmd {
    /// Path to the schema application JSON
    #[arg(short, long, value_parser = validate_file_exists)]
    pub input: PathBuf,
}

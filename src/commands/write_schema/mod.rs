mod execute;
mod execute_tests;
mod output;
mod output_tests;

use std::path::PathBuf;

use clap::Args;

use crate::input::validate_file_exists;
use crate::schema::Dbms;

/// Validate a schema IR and print the generated Prisma files
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  ir_compiler write-schema --input app.json                    # All files, configured dbms
  ir_compiler write-schema -i app.json --dbms sqlite           # SQLite dialect
  ir_compiler write-schema -i app.json --file main.prisma      # Only the datasource file
  ir_compiler write-schema -i app.json --format json           # { filename: text } map")]
pub struct WriteSchemaCmd {
    /// Path to the schema application JSON
    #[arg(short, long, value_parser = validate_file_exists)]
    pub input: PathBuf,

    /// Target database (defaults to the configured dbms)
    #[arg(short, long, value_enum)]
    pub dbms: Option<Dbms>,

    /// Only print this file
    #[arg(long)]
    pub file: Option<String>,
}

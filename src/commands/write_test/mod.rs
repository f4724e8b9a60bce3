mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

use crate::input::validate_file_exists;

/// Compile a test function IR into a TypeScript test file
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  ir_compiler write-test -d swagger.json -t case.json
  ir_compiler write-test -d swagger.json -t case.json --api-package @acme/shop-api")]
pub struct WriteTestCmd {
    /// Path to the API document JSON
    #[arg(short, long, value_parser = validate_file_exists)]
    pub document: PathBuf,

    /// Path to the test case JSON (scenario and function)
    #[arg(short = 't', long = "function", value_parser = validate_file_exists)]
    pub function: PathBuf,

    /// SDK package to import from (defaults to the configured package)
    #[arg(long)]
    pub api_package: Option<String>,
}

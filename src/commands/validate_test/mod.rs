mod execute;
mod output;

use std::path::PathBuf;

use clap::Args;

use crate::e2e::Endpoint;
use crate::input::validate_file_exists;

/// Check every API reference of a test function IR
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  ir_compiler validate-test -d swagger.json -t case.json
  ir_compiler validate-test -d swagger.json -t case.json \\
      --endpoint 'POST /shoppings/customers/sales'      # Restrict callable endpoints

Without --endpoint, the scenario's own endpoint and dependencies are allowed.")]
pub struct ValidateTestCmd {
    /// Path to the API document JSON
    #[arg(short, long, value_parser = validate_file_exists)]
    pub document: PathBuf,

    /// Path to the test case JSON (scenario and function)
    #[arg(short = 't', long = "function", value_parser = validate_file_exists)]
    pub function: PathBuf,

    /// Endpoint the function may call, as "METHOD /path" (repeatable)
    #[arg(short, long = "endpoint")]
    pub endpoints: Vec<Endpoint>,
}

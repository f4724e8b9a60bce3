//! Test function assembly.
//!
//! Two passes: compiling the body fills the import table, then the file is
//! rendered as imports, the scenario's doc comment, and the exported
//! function.

use super::compilers::{compile_statements, CompileContext, CONNECTION, DEFAULT_API_PACKAGE};
use super::document::{accessor_map, migrate_routes, Document};
use super::importer::{ImportKind, Importer};
use super::ir::{Function, Scenario};
use super::printer::print_statements;
use crate::utils::{indent_lines, jsdoc_comment, paddle};

/// Options for writing test functions.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Package name of the generated SDK
    pub api_package: String,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            api_package: DEFAULT_API_PACKAGE.to_string(),
        }
    }
}

/// Write one test file for `function` with the default SDK package.
pub fn write_test_function(document: &Document, function: &Function, scenario: &Scenario) -> String {
    write_test_function_with(document, function, scenario, &AssembleOptions::default())
}

pub fn write_test_function_with(
    document: &Document,
    function: &Function,
    scenario: &Scenario,
    options: &AssembleOptions,
) -> String {
    let accessors = accessor_map(migrate_routes(document));
    let mut importer = Importer::new();

    // pass 1: lower the body, collecting imports
    let body = {
        let mut ctx = CompileContext {
            importer: &mut importer,
            document,
            accessors: &accessors,
            api_package: &options.api_package,
        };
        compile_statements(&mut ctx, &function.statements)
    };
    // the connection parameter type lives on the SDK root
    let api = importer.external(&options.api_package, ImportKind::Default, "api");

    // pass 2: render
    let signature = format!(
        "export async function {}({}: {}.IConnection): Promise<void> {{",
        scenario.function_name, CONNECTION, api
    );
    let mut declaration = vec![signature];
    declaration.extend(indent_lines(&print_statements(&body), 1));
    declaration.push("}".to_string());

    let mut declaration_group = jsdoc_comment(&scenario.draft);
    declaration_group.extend(declaration);

    let lines = paddle(vec![importer.to_statements(), declaration_group]);
    tracing::debug!(
        function = %scenario.function_name,
        statements = function.statements.len(),
        lines = lines.len(),
        "assembled test function"
    );
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

//! ir_compiler library - deterministic IR-to-source compilers
//!
//! Two pipelines over JSON IRs produced by code-generating agents:
//!
//! - `schema`: relational schema IR → exhaustive validation → Prisma schema text
//! - `e2e`: test scenario IR → TypeScript end-to-end test function
//!
//! plus the command-line surface (`cli`, `commands`, `config`, `output`).

pub mod cli;
pub mod commands;
pub mod config;
pub mod dedup;
pub mod e2e;
pub mod input;
pub mod output;
pub mod schema;
pub mod utils;

#[macro_use]
pub mod test_macros;

#[cfg(test)]
pub mod test_utils;

pub use e2e::{validate_test_function, write_test_function};
pub use schema::{validate_schema, write_schema};

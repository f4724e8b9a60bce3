//! Schema compilers.
//!
//! Generates Prisma schema text from the backend-agnostic schema IR. The
//! target database changes the datasource boilerplate and the native type
//! attributes; the model layout is shared.
//!
//! Input must already have passed `validate_schema`. The compiler does not
//! re-check invariants and may produce malformed text for invalid input.

pub mod dialect;
pub mod prisma;

use std::collections::BTreeMap;

pub use dialect::Dbms;
pub use prisma::PrismaCompiler;

use crate::schema::definition::Application;

/// Render `app` for `dbms`, keyed by file name.
///
/// The map always contains `main.prisma` with the dialect boilerplate.
pub fn write_schema(app: &Application, dbms: Dbms) -> BTreeMap<String, String> {
    PrismaCompiler::new(dbms).compile(app)
}

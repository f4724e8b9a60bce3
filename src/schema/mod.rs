//! Relational schema IR, its validator, and its Prisma writer.
//!
//! # Overview
//!
//! 1. **Core Types** (`definition.rs`):
//!    - `Application` → `File` → `Model`
//!    - `PrimaryField`, `ForeignField` (+ `Relation`), `PlainField`
//!    - `UniqueIndex`, `PlainIndex`, `GinIndex`
//!
//! 2. **Validation** (`validate/`): every structural rule, all findings collected.
//!
//! 3. **Relations** (`relations.rs`): mapping-name assignment before writing.
//!
//! 4. **Compilers** (`compilers/`): Prisma text per dialect.
//!
//! # Type Mapping
//!
//! | IR Type  | Prisma Type | Postgres attribute   |
//! |----------|-------------|----------------------|
//! | boolean  | Boolean     | -                    |
//! | int      | Int         | @db.Integer          |
//! | double   | Float       | @db.DoublePrecision  |
//! | string   | String      | -                    |
//! | datetime | DateTime    | @db.Timestamptz      |
//! | uuid     | String      | @db.Uuid             |
//! | uri      | String      | @db.VarChar(80000)   |

pub mod compilers;
pub mod definition;
pub mod relations;
pub mod validate;

pub use compilers::{write_schema, Dbms, PrismaCompiler};
pub use definition::{
    Application, File, ForeignField, GinIndex, Model, PlainField, PlainFieldType, PlainIndex,
    PrimaryField, Relation, UniqueIndex,
};
pub use validate::{normalize_primary_indexes, validate_schema, SchemaError};

//! Target database dialects.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::schema::definition::PlainFieldType;

/// Name of the boilerplate file every compiled schema contains.
pub const MAIN_FILE: &str = "main.prisma";

const POSTGRES_MAIN: &str = r#"generator client {
  provider        = "prisma-client-js"
  previewFeatures = ["postgresqlExtensions", "views"]
  binaryTargets   = ["native", "linux-musl-openssl-3.0.x"]
}

datasource db {
  provider   = "postgresql"
  url        = env("DATABASE_URL")
  extensions = [pg_trgm]
}

generator markdown {
  provider = "prisma-markdown"
  output   = "../../docs/ERD.md"
}
"#;

const SQLITE_MAIN: &str = r#"generator client {
  provider        = "prisma-client-js"
  previewFeatures = ["views"]
  binaryTargets   = ["native", "linux-musl-openssl-3.0.x"]
}

datasource db {
  provider = "sqlite"
  url      = "file:./db.sqlite"
}

generator markdown {
  provider = "prisma-markdown"
  output   = "../../docs/ERD.md"
}
"#;

/// Database the schema is compiled for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dbms {
    #[default]
    Postgres,
    Sqlite,
}

impl Dbms {
    /// Contents of `main.prisma` for this database.
    pub fn main_prisma(&self) -> &'static str {
        match self {
            Dbms::Postgres => POSTGRES_MAIN,
            Dbms::Sqlite => SQLITE_MAIN,
        }
    }

    /// Native type attribute for a plain column, if this dialect uses one.
    pub fn physical_type(&self, field_type: PlainFieldType) -> Option<&'static str> {
        match self {
            Dbms::Postgres => field_type.postgres_type(),
            Dbms::Sqlite => None,
        }
    }

    /// Native type attribute for primary and foreign key columns.
    pub fn key_type(&self) -> Option<&'static str> {
        self.physical_type(PlainFieldType::Uuid)
    }

    /// Whether trigram GIN indexes can be emitted.
    pub fn supports_gin(&self) -> bool {
        matches!(self, Dbms::Postgres)
    }
}

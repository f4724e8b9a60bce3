//! Configuration file handling.
//!
//! Settings are read from `.ir_compiler.json` in the current directory, or
//! from the path given with `--config`. Every key is optional.
//!
//! ```json
//! {
//!   "schema": { "dbms": "sqlite", "author": "acme" },
//!   "test": { "apiPackage": "@acme/shop-api" }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::e2e::compilers::DEFAULT_API_PACKAGE;
use crate::input::{read_json, IrError};
use crate::schema::compilers::prisma::DEFAULT_AUTHOR;
use crate::schema::Dbms;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".ir_compiler.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub schema: SchemaConfig,
    pub test: TestConfig,
}

/// Schema writer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Dialect used when `--dbms` is not given
    pub dbms: Dbms,
    /// Value of the `@author` tag in model comments
    pub author: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            dbms: Dbms::default(),
            author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// Test writer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestConfig {
    /// Package the generated SDK is imported from
    pub api_package: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_package: DEFAULT_API_PACKAGE.to_string(),
        }
    }
}

impl ConfigFile {
    /// Load `.ir_compiler.json` from the current directory, falling back to
    /// defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, IrError> {
        Self::load_or_default(Path::new(CONFIG_FILE))
    }

    /// Load `path`, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, IrError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load an explicitly named configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or invalid JSON.
    pub fn load_from(path: &Path) -> Result<Self, IrError> {
        let config: ConfigFile = read_json(path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

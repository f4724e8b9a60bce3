//! Reading IR and configuration files from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrError {
    #[error("Failed to read '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Schema IR has {count} validation error(s); run validate-schema for details")]
    SchemaInvalid { count: usize },

    #[error("No schema file named '{name}'. Written files: {available}")]
    FileNotWritten { name: String, available: String },
}

/// Read and decode one JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, IrError> {
    let content = fs::read_to_string(path).map_err(|e| IrError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| IrError::ParseFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// clap value parser for input files.
pub fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("File not found: {}", path.display()))
    }
}

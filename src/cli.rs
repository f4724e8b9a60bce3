//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and shared options.
//! Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./.ir_compiler.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_global_defaults() {
        let args = Args::try_parse_from(["ir_compiler", "validate-schema", "--input", "Cargo.toml"])
            .unwrap();
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "warn");
    }

    #[rstest]
    #[case("json", OutputFormat::Json)]
    #[case("toon", OutputFormat::Toon)]
    fn test_format_after_subcommand(#[case] value: &str, #[case] expected: OutputFormat) {
        let args = Args::try_parse_from([
            "ir_compiler",
            "validate-schema",
            "--input",
            "Cargo.toml",
            "--format",
            value,
        ])
        .unwrap();
        assert_eq!(args.format, expected);
    }

    #[rstest]
    fn test_config_and_log_level() {
        let args = Args::try_parse_from([
            "ir_compiler",
            "--config",
            "custom.json",
            "--log-level",
            "debug",
            "validate-schema",
            "--input",
            "Cargo.toml",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("custom.json")));
        assert_eq!(args.log_level, "debug");
    }

    #[rstest]
    fn test_invalid_format_rejected() {
        let result = Args::try_parse_from([
            "ir_compiler",
            "--format",
            "xml",
            "validate-schema",
            "--input",
            "Cargo.toml",
        ]);
        assert!(result.is_err());
    }
}

//! CLI support for schema-lang
//!
//! Provides programmatic access to the `schema` CLI commands so other tools
//! can embed them.

mod check;
mod convert;

pub use check::{CheckOptions, CheckResult, Command, execute};
pub use convert::{node_to_json, nodes_to_json};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Validation error: {0}")]
    Validation(#[from] crate::ValidationError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No source provided. Pass a file or pipe the schema to stdin.")]
    NoSource,

    #[error("No input provided. Use --input to pass the JSON record.")]
    NoInput,

    #[error("Unknown collection: '{0}'")]
    UnknownCollection(String),
}

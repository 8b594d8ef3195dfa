//! Run schema commands against source text

use tracing::info;

use super::{CliError, nodes_to_json};
use crate::{Grammar, Parser, find_collection, unparse_all, validate_record};

/// What to do with the parsed source
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Only validate syntax
    Check,
    /// Dump the syntax tree as JSON
    Ast { pretty: bool },
    /// Print the source back in canonical form
    Format,
    /// Validate a JSON record against a collection
    Validate {
        collection: String,
        input: Option<String>,
    },
}

/// Options for a CLI run
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Schema source text
    pub source: String,
    pub command: Command,
}

/// Result of a CLI run
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Syntax tree as JSON
    Ast(String),
    /// Canonical source text
    Formatted(String),
    /// The record satisfies the collection
    RecordValid,
}

/// Execute a schema CLI command
pub fn execute(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let grammar = Grammar::new();
    let output = Parser::new(&grammar, &options.source).parse_detailed()?;

    for ambiguity in &output.ambiguities {
        info!(
            line = ambiguity.position.line,
            col = ambiguity.position.col,
            "statement continues across a line break"
        );
    }

    match &options.command {
        Command::Check => Ok(CheckResult::SyntaxValid),
        Command::Ast { pretty } => {
            let json = nodes_to_json(&output.nodes);
            let text = if *pretty {
                serde_json::to_string_pretty(&json)?
            } else {
                serde_json::to_string(&json)?
            };
            Ok(CheckResult::Ast(text))
        }
        Command::Format => Ok(CheckResult::Formatted(unparse_all(&output.nodes))),
        Command::Validate { collection, input } => {
            let input = input.as_ref().ok_or(CliError::NoInput)?;
            let record: serde_json::Value = serde_json::from_str(input)?;

            let declared = find_collection(&output.nodes, collection)
                .ok_or_else(|| CliError::UnknownCollection(collection.clone()))?;
            validate_record(declared, &record)?;
            Ok(CheckResult::RecordValid)
        }
    }
}

//! Checks built on parsed collections: call arity and record shape.

use serde_json::Value;
use thiserror::Error;

use crate::ast::{Node, NodeKind};

/// Errors raised when a call or record does not match its collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("incorrect number of arguments, expected {expected}, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("function {function} not found in collection {collection}")]
    UnknownFunction {
        collection: String,
        function: String,
    },

    #[error("{0} is not a collection")]
    NotACollection(String),

    #[error("{0} is not a function")]
    NotAFunction(String),

    #[error("record must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field {field} must be {expected}, got {got}")]
    FieldType {
        field: String,
        expected: String,
        got: &'static str,
    },
}

/// Returns a human-readable type name for a JSON value
fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks an argument count against a function's parameters.
///
/// Parameters marked `?` may be left out. Too few arguments report the number
/// of required parameters, too many report the total.
pub fn check_call_arity(function: &Node, args: usize) -> Result<(), ValidationError> {
    let NodeKind::Function { params, .. } = &function.kind else {
        return Err(ValidationError::NotAFunction(function.type_name().to_string()));
    };

    let required = params
        .iter()
        .filter(|p| !matches!(p.kind, NodeKind::Param { optional: true, .. }))
        .count();

    if args < required {
        return Err(ValidationError::ArgumentCount {
            expected: required,
            got: args,
        });
    }
    if args > params.len() {
        return Err(ValidationError::ArgumentCount {
            expected: params.len(),
            got: args,
        });
    }
    Ok(())
}

/// Looks up `function` in `collection` and checks the argument count.
pub fn check_call(collection: &Node, function: &str, args: usize) -> Result<(), ValidationError> {
    let name = collection
        .collection_name()
        .ok_or_else(|| ValidationError::NotACollection(collection.type_name().to_string()))?;

    let declared = collection
        .function(function)
        .ok_or_else(|| ValidationError::UnknownFunction {
            collection: name.to_string(),
            function: function.to_string(),
        })?;

    check_call_arity(declared, args)
}

/// Checks a record against the fields of a collection.
///
/// Required fields must be present and non-null. `string`, `number` and
/// `boolean` fields, and arrays of them (`string[]`), are type checked; any
/// other declared type is accepted as is.
pub fn validate_record(collection: &Node, record: &Value) -> Result<(), ValidationError> {
    if collection.collection_name().is_none() {
        return Err(ValidationError::NotACollection(
            collection.type_name().to_string(),
        ));
    }

    let Value::Object(record) = record else {
        return Err(ValidationError::NotAnObject(type_name(record)));
    };

    for field in collection.fields() {
        let NodeKind::Field {
            name,
            field_type,
            required,
        } = &field.kind
        else {
            continue;
        };

        match record.get(name) {
            None | Some(Value::Null) => {
                if *required {
                    return Err(ValidationError::MissingField(name.clone()));
                }
            }
            Some(value) => check_type(name, field_type, value)?,
        }
    }
    Ok(())
}

fn check_type(field: &str, field_type: &str, value: &Value) -> Result<(), ValidationError> {
    let mismatch = |got| ValidationError::FieldType {
        field: field.to_string(),
        expected: field_type.to_string(),
        got,
    };

    if let Some(item_type) = field_type.strip_suffix("[]") {
        let Value::Array(items) = value else {
            return Err(mismatch(type_name(value)));
        };
        for item in items {
            if !matches_scalar(item_type, item) {
                return Err(mismatch(type_name(item)));
            }
        }
        return Ok(());
    }

    if matches_scalar(field_type, value) {
        Ok(())
    } else {
        Err(mismatch(type_name(value)))
    }
}

fn matches_scalar(field_type: &str, value: &Value) -> bool {
    match field_type {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        _ => true,
    }
}

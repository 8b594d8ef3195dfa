// tests/validate_tests.rs

use pretty_assertions::assert_eq;
use serde_json::json;
use schema_lang::{Node, ValidationError, check_call, check_call_arity, find_collection, parse, validate_record};

const SCHEMA: &str = "
collection Account {
  id: string!
  balance: number
  tags: string[]
  owner: User
  active: boolean!

  function constructor (id) {
    this.id = id
  }

  function transfer (to: Account, amount: number, memo?: string) {
    this.balance -= amount
  }
}

collection User {
  name: string
}

function helper () {}
";

fn schema() -> Vec<Node> {
    parse(SCHEMA).unwrap()
}

fn account(nodes: &[Node]) -> &Node {
    find_collection(nodes, "Account").unwrap()
}

// ============================================================================
// Call arity
// ============================================================================

#[test]
fn test_too_few_arguments() {
    let nodes = schema();
    let error = check_call(account(&nodes), "constructor", 0).unwrap_err();

    assert_eq!(
        error,
        ValidationError::ArgumentCount {
            expected: 1,
            got: 0
        }
    );
    assert_eq!(
        error.to_string(),
        "incorrect number of arguments, expected 1, got 0"
    );
}

#[test]
fn test_too_many_arguments() {
    let nodes = schema();
    let error = check_call(account(&nodes), "transfer", 4).unwrap_err();
    assert_eq!(
        error.to_string(),
        "incorrect number of arguments, expected 3, got 4"
    );
}

#[test]
fn test_too_many_for_two_params() {
    let nodes = parse("function pair (a, b) {}").unwrap();
    assert_eq!(
        check_call_arity(&nodes[0], 3).unwrap_err().to_string(),
        "incorrect number of arguments, expected 2, got 3"
    );
}

#[test]
fn test_optional_parameters() {
    let nodes = schema();
    let collection = account(&nodes);

    assert!(check_call(collection, "transfer", 2).is_ok());
    assert!(check_call(collection, "transfer", 3).is_ok());
    assert_eq!(
        check_call(collection, "transfer", 1),
        Err(ValidationError::ArgumentCount {
            expected: 2,
            got: 1
        })
    );
}

#[test]
fn test_unknown_function() {
    let nodes = schema();
    let error = check_call(account(&nodes), "withdraw", 1).unwrap_err();
    assert_eq!(
        error.to_string(),
        "function withdraw not found in collection Account"
    );
}

#[test]
fn test_arity_needs_function_node() {
    let nodes = schema();
    assert_eq!(
        check_call_arity(account(&nodes), 0),
        Err(ValidationError::NotAFunction("collection".into()))
    );
    assert!(check_call_arity(&nodes[2], 0).is_ok());
    assert!(matches!(
        check_call(&nodes[2], "helper", 0),
        Err(ValidationError::NotACollection(_))
    ));
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_valid_record() {
    let nodes = schema();
    let record = json!({
        "id": "acc-1",
        "balance": 10.5,
        "tags": ["a", "b"],
        "owner": { "name": "x" },
        "active": true,
        "extra": 1
    });
    assert_eq!(validate_record(account(&nodes), &record), Ok(()));
}

#[test]
fn test_optional_fields_may_be_missing() {
    let nodes = schema();
    let record = json!({ "id": "acc-1", "active": false, "balance": null });
    assert!(validate_record(account(&nodes), &record).is_ok());
}

#[test]
fn test_missing_required_field() {
    let nodes = schema();

    let error = validate_record(account(&nodes), &json!({ "active": true })).unwrap_err();
    assert_eq!(error, ValidationError::MissingField("id".into()));
    assert_eq!(error.to_string(), "missing required field: id");

    let error = validate_record(account(&nodes), &json!({ "id": null, "active": true }));
    assert_eq!(error, Err(ValidationError::MissingField("id".into())));
}

#[test]
fn test_field_type_mismatch() {
    let nodes = schema();
    let record = json!({ "id": "acc-1", "active": true, "balance": "10" });

    let error = validate_record(account(&nodes), &record).unwrap_err();
    assert_eq!(error.to_string(), "field balance must be number, got string");
}

#[test]
fn test_array_fields() {
    let nodes = schema();
    let collection = account(&nodes);

    let record = json!({ "id": "a", "active": true, "tags": "a" });
    assert_eq!(
        validate_record(collection, &record),
        Err(ValidationError::FieldType {
            field: "tags".into(),
            expected: "string[]".into(),
            got: "string"
        })
    );

    let record = json!({ "id": "a", "active": true, "tags": ["a", 1] });
    assert_eq!(
        validate_record(collection, &record).unwrap_err().to_string(),
        "field tags must be string[], got number"
    );
}

#[test]
fn test_other_types_are_accepted() {
    let nodes = schema();
    let record = json!({ "id": "a", "active": true, "owner": 42 });
    assert!(validate_record(account(&nodes), &record).is_ok());
}

#[test]
fn test_record_must_be_object() {
    let nodes = schema();
    assert_eq!(
        validate_record(account(&nodes), &json!([1, 2])),
        Err(ValidationError::NotAnObject("array"))
    );
}

//! Syntax tree -> JSON conversion
//!
//! Every node becomes an object with its `type`, position (`line`, `col`,
//! `offset`, `lineBreaks`) and `text`, followed by the fields of its variant.
//! `parenthesized`, `bracket` and `prefix` only appear when set.

use serde_json::{Map, Number, Value, json};

use crate::ast::{Node, NodeKind, Primitive};

/// Convert a statement list to a JSON array
pub fn nodes_to_json(nodes: &[Node]) -> Value {
    Value::Array(nodes.iter().map(node_to_json).collect())
}

/// Convert one node to a JSON object
pub fn node_to_json(node: &Node) -> Value {
    let mut obj = Map::new();
    obj.insert("type".into(), json!(node.type_name()));

    match &node.kind {
        NodeKind::Array { items } => {
            obj.insert("value".into(), nodes_to_json(items));
        }
        NodeKind::Object { entries } => {
            obj.insert("value".into(), nodes_to_json(entries));
        }
        NodeKind::ObjectKeyValue { key, value } => {
            obj.insert("key".into(), node_to_json(key));
            obj.insert("value".into(), node_to_json(value));
        }
        NodeKind::Primitive(Primitive::Number(n)) => {
            let value = n
                .to_f64()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null);
            obj.insert("value".into(), value);
        }
        NodeKind::Primitive(Primitive::String(s)) => {
            obj.insert("value".into(), json!(s));
        }
        NodeKind::Primitive(Primitive::Boolean(b)) => {
            obj.insert("value".into(), json!(b));
        }
        NodeKind::Binary {
            left, op, right, ..
        }
        | NodeKind::Assign { left, op, right } => {
            obj.insert("left".into(), node_to_json(left));
            obj.insert("op".into(), node_to_json(op));
            obj.insert("right".into(), node_to_json(right));
        }
        NodeKind::Operator(op) => {
            let symbol = if node.text.is_empty() {
                op.symbol()
            } else {
                node.text.as_str()
            };
            obj.insert("value".into(), json!(symbol));
        }
        NodeKind::Not { value } | NodeKind::Negate { value } => {
            obj.insert("value".into(), node_to_json(value));
        }
        NodeKind::Name(name) => {
            obj.insert("value".into(), json!(name));
        }
        NodeKind::Call { args } => {
            obj.insert("args".into(), nodes_to_json(args));
        }
        NodeKind::Computed { expression } => {
            obj.insert("expression".into(), node_to_json(expression));
        }
        NodeKind::Return { value } => {
            let value = value.as_deref().map(node_to_json).unwrap_or(Value::Null);
            obj.insert("value".into(), value);
        }
        NodeKind::Const { name, value } => {
            obj.insert("name".into(), json!(name));
            obj.insert("value".into(), node_to_json(value));
        }
        NodeKind::Let { name, value } => {
            obj.insert("name".into(), json!(name));
            let value = value.as_deref().map(node_to_json).unwrap_or(Value::Null);
            obj.insert("value".into(), value);
        }
        NodeKind::If {
            expression,
            body,
            elses,
        } => {
            obj.insert("expression".into(), node_to_json(expression));
            obj.insert("body".into(), nodes_to_json(body));
            obj.insert("else".into(), nodes_to_json(elses));
        }
        NodeKind::ElseIf { expression, body } => {
            obj.insert("expression".into(), node_to_json(expression));
            obj.insert("body".into(), nodes_to_json(body));
        }
        NodeKind::Else { body } => {
            obj.insert("body".into(), nodes_to_json(body));
        }
        NodeKind::Function { name, params, body } => {
            obj.insert("name".into(), json!(name));
            obj.insert("params".into(), nodes_to_json(params));
            obj.insert("body".into(), nodes_to_json(body));
        }
        NodeKind::Param {
            name,
            param_type,
            optional,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("paramType".into(), json!(param_type));
            obj.insert("optional".into(), json!(optional));
        }
        NodeKind::Field {
            name,
            field_type,
            required,
        } => {
            obj.insert("name".into(), json!(name));
            obj.insert("fieldType".into(), json!(field_type));
            obj.insert("required".into(), json!(required));
        }
        NodeKind::Index { fields } => {
            let fields = fields
                .iter()
                .map(|f| json!({ "name": f.name, "direction": f.direction().as_str() }))
                .collect();
            obj.insert("fields".into(), Value::Array(fields));
        }
        NodeKind::Collection { name, items } => {
            obj.insert("name".into(), json!(name));
            obj.insert("items".into(), nodes_to_json(items));
        }
    }

    obj.insert("line".into(), json!(node.position.line));
    obj.insert("col".into(), json!(node.position.col));
    obj.insert("offset".into(), json!(node.position.offset));
    obj.insert("lineBreaks".into(), json!(node.line_breaks));
    obj.insert("text".into(), json!(node.text));

    if node.parenthesized {
        obj.insert("parenthesized".into(), json!(true));
    }
    if node.bracket {
        obj.insert("bracket".into(), json!(true));
    }
    if let Some(prefix) = node.prefix.as_deref() {
        obj.insert("prefix".into(), node_to_json(prefix));
    }

    Value::Object(obj)
}

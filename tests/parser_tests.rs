// tests/parser_tests.rs

use pretty_assertions::assert_eq;
use schema_lang::ast::{BinaryKind, Direction, IndexField, Op, Primitive, TokenKind};
use schema_lang::parser::MAX_DEPTH;
use schema_lang::{Grammar, Level, Node, NodeKind, ParseError, Parser, parse};

fn parse_one(source: &str) -> Node {
    let mut nodes = parse(source).unwrap();
    assert_eq!(nodes.len(), 1, "expected one statement in {:?}", source);
    nodes.remove(0)
}

fn expr(source: &str) -> Node {
    let grammar = Grammar::new();
    Parser::new(&grammar, source).parse_expression().unwrap()
}

fn binary(node: &Node) -> (&Node, Op, &Node) {
    match &node.kind {
        NodeKind::Binary {
            left, op, right, ..
        } => match op.kind {
            NodeKind::Operator(op) => (left, op, right),
            _ => panic!("Expected operator node, got {:?}", op),
        },
        _ => panic!("Expected binary node, got {:?}", node),
    }
}

fn prefix(node: &Node) -> &Node {
    node.prefix.as_deref().expect("expected a prefix")
}

// ============================================================================
// Operator precedence
// ============================================================================

#[test]
fn test_or_is_outermost() {
    let node = parse_one("a > 10 || b == 12 && c == 10");
    assert_eq!(node.type_name(), "or");

    let (left, _, right) = binary(&node);
    assert_eq!(left.type_name(), "compare");
    assert_eq!(right.type_name(), "and");
}

#[test]
fn test_explicit_grouping_preserved() {
    let node = parse_one("(a > 10 || b == 12) && c == 10");
    assert_eq!(node.type_name(), "and");

    let (left, _, right) = binary(&node);
    assert!(left.parenthesized);
    assert_eq!(left.type_name(), "or");
    assert!(!right.parenthesized);
}

#[test]
fn test_product_binds_tighter_than_sum() {
    let node = expr("1 + 2 * 3");
    let (left, op, right) = binary(&node);
    assert_eq!(op, Op::Add);
    assert_eq!(left.kind, NodeKind::Primitive(Primitive::Number("1".into())));
    assert_eq!(right.type_name(), "product");
}

#[test]
fn test_left_associative() {
    let node = expr("a - b - c");
    let (left, op, right) = binary(&node);
    assert_eq!(op, Op::Subtract);
    assert_eq!(left.type_name(), "sum");
    assert_eq!(right.name(), Some("c"));
}

#[test]
fn test_power_is_left_associative() {
    let node = expr("2 ^ 3 ** 2");
    let (left, op, _) = binary(&node);
    assert_eq!(op, Op::Power);
    assert_eq!(left.type_name(), "power");
}

#[test]
fn test_concat_between_sum_and_comparison() {
    let node = expr("a + b & c == d");
    assert_eq!(node.type_name(), "compare");

    let (left, _, _) = binary(&node);
    assert_eq!(left.type_name(), "concat");
    let (inner, op, _) = binary(left);
    assert_eq!(op, Op::Concat);
    assert_eq!(inner.type_name(), "sum");
}

#[test]
fn test_comparison_operators() {
    let test_cases = vec![
        ("a == b", Op::Equal),
        ("a != b", Op::NotEqual),
        ("a < b", Op::LessThan),
        ("a <= b", Op::LessEqual),
        ("a > b", Op::GreaterThan),
        ("a >= b", Op::GreaterEqual),
    ];

    for (source, expected) in test_cases {
        let node = expr(source);
        assert_eq!(node.type_name(), "compare", "Failed for input: {}", source);
        assert_eq!(binary(&node).1, expected, "Failed for input: {}", source);
    }
}

#[test]
fn test_word_or_keeps_source_text() {
    let node = expr("a or b");
    assert_eq!(node.type_name(), "or");
    match &node.kind {
        NodeKind::Binary { op, .. } => assert_eq!(op.text, "or"),
        _ => panic!("Expected binary node"),
    }
}

#[test]
fn test_unary_binds_tighter_than_and() {
    let node = expr("!a && b");
    let (left, op, _) = binary(&node);
    assert_eq!(op, Op::And);
    assert_eq!(left.type_name(), "not");
}

#[test]
fn test_power_binds_tighter_than_negate() {
    let node = expr("-a ^ 2");
    match &node.kind {
        NodeKind::Negate { value } => assert_eq!(value.type_name(), "power"),
        _ => panic!("Expected negate, got {:?}", node),
    }
}

#[test]
fn test_unary_exponent() {
    let node = expr("2 ^ -1");
    let (_, op, right) = binary(&node);
    assert_eq!(op, Op::Power);
    assert_eq!(right.type_name(), "negate");

    let node = expr("a ** !b");
    assert_eq!(binary(&node).2.type_name(), "not");
}

#[test]
fn test_unary_exponent_takes_rest_of_power() {
    let node = expr("a ^ -b ^ c");
    let (left, _, right) = binary(&node);
    assert_eq!(left.name(), Some("a"));
    match &right.kind {
        NodeKind::Negate { value } => assert_eq!(value.type_name(), "power"),
        _ => panic!("Expected negate, got {:?}", right),
    }
}

#[test]
fn test_nested_unary() {
    let node = expr("not !a");
    match &node.kind {
        NodeKind::Not { value } => assert_eq!(value.type_name(), "not"),
        _ => panic!("Expected not, got {:?}", node),
    }
}

// ============================================================================
// Prefix chains
// ============================================================================

#[test]
fn test_call_chain() {
    let node = parse_one("a().b(c)");
    assert_eq!(node.type_name(), "call");

    match &node.kind {
        NodeKind::Call { args } => {
            assert_eq!(args.len(), 1);
            assert_eq!(args[0].name(), Some("c"));
        }
        _ => panic!("Expected call"),
    }

    let b = prefix(&node);
    assert_eq!(b.name(), Some("b"));

    let a_call = prefix(b);
    assert_eq!(a_call.kind, NodeKind::Call { args: vec![] });
    assert_eq!(prefix(a_call).name(), Some("a"));
    assert!(prefix(a_call).prefix.is_none());
}

#[test]
fn test_dotted_names() {
    let node = expr("a.b.c");
    assert_eq!(node.name(), Some("c"));
    assert_eq!(prefix(&node).name(), Some("b"));
    assert_eq!(prefix(prefix(&node)).name(), Some("a"));
    assert_eq!(node.text, "a.b.c");
    assert_eq!(node.position.col, 1);
}

#[test]
fn test_bracket_merges_key_into_node() {
    let node = expr("a[0]");
    assert_eq!(node.type_name(), "number");
    assert!(node.bracket);
    assert_eq!(prefix(&node).name(), Some("a"));

    let node = expr("items[i + 1]");
    assert_eq!(node.type_name(), "sum");
    assert!(node.bracket);
    assert_eq!(prefix(&node).name(), Some("items"));
}

#[test]
fn test_bracket_then_dot() {
    let node = expr("a.b[\"c\"].d");
    assert_eq!(node.name(), Some("d"));

    let c = prefix(&node);
    assert_eq!(c.kind, NodeKind::Primitive(Primitive::String("c".into())));
    assert!(c.bracket);
    assert_eq!(prefix(c).name(), Some("b"));
    assert!(!prefix(c).bracket);
}

#[test]
fn test_chained_bracket_key_is_wrapped() {
    let node = expr("a[b.c]");
    assert!(node.bracket);
    assert_eq!(prefix(&node).name(), Some("a"));

    match &node.kind {
        NodeKind::Computed { expression } => {
            assert_eq!(expression.name(), Some("c"));
            assert_eq!(prefix(expression).name(), Some("b"));
        }
        _ => panic!("Expected computed key, got {:?}", node),
    }
}

#[test]
fn test_parenthesized_prefix() {
    let node = expr("(a + b).c");
    assert_eq!(node.name(), Some("c"));
    assert!(prefix(&node).parenthesized);
    assert_eq!(prefix(&node).type_name(), "sum");
}

#[test]
fn test_call_on_literal() {
    let node = expr("'abc'.toUpperCase()");
    assert_eq!(node.type_name(), "call");
    assert_eq!(prefix(prefix(&node)).type_name(), "string");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_primitives() {
    assert_eq!(
        expr("'hi'").kind,
        NodeKind::Primitive(Primitive::String("hi".into()))
    );
    assert_eq!(
        expr("true").kind,
        NodeKind::Primitive(Primitive::Boolean(true))
    );
    match expr("1.50").kind {
        NodeKind::Primitive(Primitive::Number(n)) => {
            assert_eq!(n.as_str(), "1.50");
            assert_eq!(n.to_decimal().unwrap().to_string(), "1.50");
        }
        other => panic!("Expected number, got {:?}", other),
    }
}

#[test]
fn test_numbers_keep_source_text() {
    let test_cases = vec![
        "100000000000000000000000000000",
        "0.123456789012345678901234567890",
    ];

    for source in test_cases {
        match expr(source).kind {
            NodeKind::Primitive(Primitive::Number(n)) => {
                assert_eq!(n.as_str(), source);
                assert_eq!(n.to_decimal(), None, "Failed for input: {}", source);
                assert!(n.to_f64().is_some());
            }
            other => panic!("Expected number, got {:?}", other),
        }
    }
}

#[test]
fn test_array_literal() {
    match expr("[1, a, [],]").kind {
        NodeKind::Array { items } => {
            assert_eq!(items.len(), 3);
            assert_eq!(items[2].kind, NodeKind::Array { items: vec![] });
        }
        other => panic!("Expected array, got {:?}", other),
    }
}

#[test]
fn test_object_literal() {
    let node = expr("{ a, b: 1, 'c d': x.y }");
    let NodeKind::Object { entries } = &node.kind else {
        panic!("Expected object, got {:?}", node);
    };
    assert_eq!(entries.len(), 3);

    match &entries[0].kind {
        NodeKind::ObjectKeyValue { key, value } => {
            assert_eq!(key.name(), Some("a"));
            assert_eq!(value.name(), Some("a"));
        }
        _ => panic!("Expected key/value"),
    }
    match &entries[2].kind {
        NodeKind::ObjectKeyValue { key, value } => {
            assert_eq!(key.type_name(), "string");
            assert_eq!(value.name(), Some("y"));
        }
        _ => panic!("Expected key/value"),
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_assignment_operators() {
    let test_cases = vec![
        ("a = 1", Op::Assign),
        ("this.total += 1", Op::AddAssign),
        ("counts[i] -= 1", Op::SubAssign),
    ];

    for (source, expected) in test_cases {
        let node = parse_one(source);
        match &node.kind {
            NodeKind::Assign { op, .. } => {
                assert_eq!(op.kind, NodeKind::Operator(expected), "Failed for: {}", source)
            }
            _ => panic!("Expected assignment for {}", source),
        }
    }
}

#[test]
fn test_invalid_assignment_target() {
    for source in ["a() = 1", "(a) = 1", "1 = a"] {
        assert!(
            matches!(
                parse(source),
                Err(ParseError::InvalidAssignmentTarget { .. })
            ),
            "Failed for: {}",
            source
        );
    }
}

#[test]
fn test_const_and_let() {
    let nodes = parse("const a = 1; let b = a\nlet c").unwrap();
    assert_eq!(nodes.len(), 3);

    assert!(matches!(&nodes[0].kind, NodeKind::Const { name, .. } if name == "a"));
    assert!(matches!(&nodes[1].kind, NodeKind::Let { name, value: Some(_) } if name == "b"));
    assert!(matches!(&nodes[2].kind, NodeKind::Let { name, value: None } if name == "c"));
}

#[test]
fn test_if_else_chain() {
    let node = parse_one(
        "if a > 1 {\n  return 1\n} else if b {\n  return 2\n} else {\n  return 3\n}",
    );

    let NodeKind::If {
        expression,
        body,
        elses,
    } = &node.kind
    else {
        panic!("Expected if, got {:?}", node);
    };
    assert_eq!(expression.type_name(), "compare");
    assert_eq!(body.len(), 1);

    let types: Vec<&str> = elses.iter().map(|e| e.type_name()).collect();
    assert_eq!(types, vec!["elseif", "else"]);
    assert_eq!(elses[0].position.line, 3);
}

#[test]
fn test_function() {
    let node = parse_one("function transfer (to, amount?: number, memo: string) {\n  return\n}");

    let NodeKind::Function { name, params, body } = &node.kind else {
        panic!("Expected function, got {:?}", node);
    };
    assert_eq!(name, "transfer");
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].kind, NodeKind::Return { value: None });

    assert_eq!(
        params[1].kind,
        NodeKind::Param {
            name: "amount".into(),
            param_type: Some("number".into()),
            optional: true
        }
    );
    assert_eq!(
        params[2].kind,
        NodeKind::Param {
            name: "memo".into(),
            param_type: Some("string".into()),
            optional: false
        }
    );
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn test_field_required_suffix() {
    let node = parse_one("collection X { age: number! }");
    let fields: Vec<&Node> = node.fields().collect();
    assert_eq!(
        fields[0].kind,
        NodeKind::Field {
            name: "age".into(),
            field_type: "number".into(),
            required: true
        }
    );

    let node = parse_one("collection X { age: number }");
    assert!(matches!(
        node.fields().next().unwrap().kind,
        NodeKind::Field { required: false, .. }
    ));
}

#[test]
fn test_field_shorthand_and_arrays() {
    let node = parse_one("collection X {\n  name string\n  tags: string[];\n}");
    let fields: Vec<&NodeKind> = node.fields().map(|f| &f.kind).collect();
    assert_eq!(
        fields,
        vec![
            &NodeKind::Field {
                name: "name".into(),
                field_type: "string".into(),
                required: false
            },
            &NodeKind::Field {
                name: "tags".into(),
                field_type: "string[]".into(),
                required: false
            },
        ]
    );
}

#[test]
fn test_collection_items() {
    let source = "collection Account {
  id: string!
  balance: number
  @index(id, [balance, desc])

  function constructor (id) {
    this.id = id
  }
}";
    let node = parse_one(source);
    assert_eq!(node.collection_name(), Some("Account"));
    assert_eq!(node.fields().count(), 2);
    assert_eq!(node.functions().count(), 1);
    assert!(node.function("constructor").is_some());
    assert!(node.function("missing").is_none());

    let index = node.indexes().next().unwrap();
    assert_eq!(
        index.kind,
        NodeKind::Index {
            fields: vec![
                IndexField {
                    name: "id".into(),
                    direction: None
                },
                IndexField {
                    name: "balance".into(),
                    direction: Some(Direction::Desc)
                },
            ]
        }
    );
}

#[test]
fn test_multiple_root_statements() {
    let nodes = parse("collection A { a: string }; function f () {}\ncollection B {}").unwrap();
    let types: Vec<&str> = nodes.iter().map(|n| n.type_name()).collect();
    assert_eq!(types, vec!["collection", "function", "collection"]);
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn test_node_positions() {
    let nodes = parse("\n  a +\n  b").unwrap();
    let node = &nodes[0];
    assert_eq!(node.position.line, 2);
    assert_eq!(node.position.col, 3);
    assert_eq!(node.position.offset, 3);
    assert_eq!(node.line_breaks, 1);
    assert_eq!(node.text, "a +\n  b");
}

#[test]
fn test_parenthesized_text_includes_parens() {
    let node = expr("(a)");
    assert_eq!(node.text, "(a)");
    assert_eq!(node.position.col, 1);
}

#[test]
fn test_equality_ignores_positions() {
    assert_eq!(expr("a+b"), expr("a  +\n b"));
    assert_ne!(expr("a + b"), expr("(a + b)"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_syntax_error_names_token_and_expected() {
    let error = parse("collection X { age: }").unwrap_err();

    match &error {
        ParseError::UnexpectedToken {
            kind,
            value,
            position,
            expected,
            ..
        } => {
            assert_eq!(*kind, TokenKind::RBrace);
            assert_eq!(value, "}");
            assert_eq!(position.col, 21);
            assert_eq!(expected, &vec!["name".to_string()]);
        }
        other => panic!("Expected unexpected token, got {:?}", other),
    }

    let message = error.to_string();
    assert!(message.contains("unexpected \"}\" token"));
    assert!(message.contains("expected one of: name"));
    assert!(message.contains("1 | collection X { age: }"));
}

#[test]
fn test_unexpected_end() {
    let error = parse("function f () {").unwrap_err();
    assert!(matches!(error, ParseError::UnexpectedEnd { .. }));
    assert!(error.expected().contains(&"\"}\"".to_string()));
}

#[test]
fn test_lex_error_surfaces_as_parse_error() {
    let error = parse("a = #").unwrap_err();
    assert!(matches!(error, ParseError::Lex { .. }));
    assert_eq!(error.position().col, 5);
}

#[test]
fn test_empty_source_is_an_error() {
    assert!(matches!(
        parse("  // nothing\n"),
        Err(ParseError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_deep_nesting_is_an_error() {
    let test_cases = vec![
        format!("{}a{}", "(".repeat(2000), ")".repeat(2000)),
        format!("x = {}1{}", "[".repeat(2000), "]".repeat(2000)),
        format!("{}a", "!".repeat(2000)),
        format!("{}{}", "if a {".repeat(2000), "}".repeat(2000)),
    ];

    for source in test_cases {
        match parse(&source) {
            Err(ParseError::TooDeep { limit, position }) => {
                assert_eq!(limit, MAX_DEPTH);
                assert_eq!(position.line, 1);
            }
            other => panic!("Expected nesting error, got {:?}", other),
        }
    }
}

#[test]
fn test_moderate_nesting_parses() {
    let source = format!("{}a{}", "(".repeat(20), ")".repeat(20));
    assert_eq!(expr(&source).name(), Some("a"));
}

#[test]
fn test_bad_index_direction() {
    let error = parse("collection X { @index([a, up]) }").unwrap_err();
    assert_eq!(error.expected(), &["asc".to_string(), "desc".to_string()]);
}

#[test]
fn test_expression_requires_end_of_input() {
    let grammar = Grammar::new();
    assert!(Parser::new(&grammar, "a b").parse_expression().is_err());
}

// ============================================================================
// Ambiguity and grammar configuration
// ============================================================================

#[test]
fn test_line_break_continuation_is_reported() {
    let grammar = Grammar::new();
    let output = Parser::new(&grammar, "x = a\n(b)").parse_detailed().unwrap();

    assert_eq!(output.nodes.len(), 1);
    assert_eq!(output.ambiguities.len(), 1);
    assert_eq!(output.ambiguities[0].token, TokenKind::LParen);
    assert_eq!(output.ambiguities[0].position.line, 2);
}

#[test]
fn test_separate_statements_are_not_ambiguous() {
    let grammar = Grammar::new();
    let output = Parser::new(&grammar, "a\nb;c").parse_detailed().unwrap();

    assert_eq!(output.nodes.len(), 3);
    assert!(output.ambiguities.is_empty());
}

#[test]
fn test_grammar_is_reusable() {
    let grammar = Grammar::new();
    let first = Parser::new(&grammar, "a.b").parse().unwrap();
    let second = Parser::new(&grammar, "a.b").parse().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_precedence_table() {
    // product binds looser than sum here
    let grammar = Grammar::with_levels(vec![
        Level::binary(BinaryKind::Product, &[TokenKind::Star]),
        Level::binary(BinaryKind::Sum, &[TokenKind::Plus]),
    ]);
    let node = Parser::new(&grammar, "1 + 2 * 3").parse_expression().unwrap();
    assert_eq!(node.type_name(), "product");
}

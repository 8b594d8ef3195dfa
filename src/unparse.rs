//! Rendering syntax trees back to source text.
//!
//! The output is canonical rather than a copy of the source formatting:
//! statements sit one per line, operators are surrounded by single spaces and
//! strings are always double quoted. Re-parsing the output yields a tree equal
//! to the one that was printed.
//!
//! # Examples
//!
//! ```
//! use schema_lang::{parse, unparse_all};
//!
//! let source = "function Hello () {\nreturn 10\n}";
//! assert_eq!(unparse_all(&parse(source).unwrap()), source);
//! ```
//!
//! # Lossy spots
//!
//! - `not x` prints as `!x`
//! - `a or b` prints as written, but a tree built without source text prints
//!   each operator's canonical symbol (`||`)
//! - `{ a: a }` prints as the shorthand `{ a }`

use crate::ast::{IndexField, Node, NodeKind, Primitive};

#[derive(Debug, Clone, Copy, Default)]
pub struct Unparser;

impl Unparser {
    pub fn new() -> Self {
        Unparser
    }

    pub fn print(&self, node: &Node) -> String {
        self.print_node(node, node.parenthesized)
    }

    /// Prints a statement list, one statement per line.
    ///
    /// A `;` ends the previous line when a line break alone would let the
    /// next statement read as its continuation: the next statement starts
    /// with `(`, `[` or `-`, or the previous one is a bare `return`.
    pub fn print_all(&self, nodes: &[Node]) -> String {
        let mut result = String::new();
        let mut previous: Option<&Node> = None;

        for node in nodes {
            let text = self.print(node);
            if let Some(previous) = previous {
                if needs_separator(previous, &text) {
                    result.push(';');
                }
                result.push('\n');
            }
            result.push_str(&text);
            previous = Some(node);
        }
        result
    }

    fn print_node(&self, node: &Node, parenthesized: bool) -> String {
        if parenthesized {
            return format!("({})", self.print_node(node, false));
        }

        if node.bracket {
            let object = node
                .prefix
                .as_deref()
                .map(|prefix| self.print(prefix))
                .unwrap_or_default();
            return format!("{}[{}]", object, self.print_kind(node, false));
        }

        self.print_kind(node, true)
    }

    fn print_prefix(&self, node: &Node, with_prefix: bool) -> String {
        match node.prefix.as_deref() {
            Some(prefix) if with_prefix => self.print(prefix),
            _ => String::new(),
        }
    }

    fn print_kind(&self, node: &Node, with_prefix: bool) -> String {
        match &node.kind {
            NodeKind::Name(name) => match node.prefix.as_deref() {
                Some(prefix) if with_prefix => format!("{}.{}", self.print(prefix), name),
                _ => name.clone(),
            },
            NodeKind::Call { args } => format!(
                "{}({})",
                self.print_prefix(node, with_prefix),
                self.print_list(args)
            ),
            NodeKind::Computed { expression } => self.print(expression),

            NodeKind::Primitive(Primitive::Number(n)) => n.as_str().to_string(),
            NodeKind::Primitive(Primitive::String(s)) => format!("\"{}\"", self.escape_string(s)),
            NodeKind::Primitive(Primitive::Boolean(b)) => b.to_string(),

            NodeKind::Array { items } => {
                if items.is_empty() {
                    "[]".to_string()
                } else {
                    format!("[{}]", self.print_list(items))
                }
            }
            NodeKind::Object { entries } => {
                if entries.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", self.print_list(entries))
                }
            }
            NodeKind::ObjectKeyValue { key, value } => {
                let key_text = self.print(key);
                let value_text = self.print(value);
                let plain_name = key.name().is_some() && key.prefix.is_none() && !key.parenthesized;
                if plain_name && key_text == value_text {
                    key_text
                } else {
                    format!("{}: {}", key_text, value_text)
                }
            }

            NodeKind::Binary {
                left, op, right, ..
            }
            | NodeKind::Assign { left, op, right } => format!(
                "{} {} {}",
                self.print(left),
                self.print(op),
                self.print(right)
            ),
            NodeKind::Operator(op) => {
                if node.text.is_empty() {
                    op.symbol().to_string()
                } else {
                    node.text.clone()
                }
            }
            NodeKind::Not { value } => format!("!{}", self.print(value)),
            NodeKind::Negate { value } => format!("-{}", self.print(value)),

            NodeKind::Return { value } => match value {
                Some(value) => format!("return {}", self.print(value)),
                None => "return".to_string(),
            },
            NodeKind::Const { name, value } => format!("const {} = {}", name, self.print(value)),
            NodeKind::Let { name, value } => match value {
                Some(value) => format!("let {} = {}", name, self.print(value)),
                None => format!("let {}", name),
            },
            NodeKind::If {
                expression,
                body,
                elses,
            } => {
                let mut result = format!("if {} {}", self.print(expression), self.print_block(body));
                for clause in elses {
                    result.push(' ');
                    result.push_str(&self.print(clause));
                }
                result
            }
            NodeKind::ElseIf { expression, body } => format!(
                "else if {} {}",
                self.print(expression),
                self.print_block(body)
            ),
            NodeKind::Else { body } => format!("else {}", self.print_block(body)),

            NodeKind::Function { name, params, body } => format!(
                "function {} ({}) {}",
                name,
                self.print_list(params),
                self.print_block(body)
            ),
            NodeKind::Param {
                name,
                param_type,
                optional,
            } => {
                let mut result = name.clone();
                if *optional {
                    result.push('?');
                }
                if let Some(param_type) = param_type {
                    result.push_str(": ");
                    result.push_str(param_type);
                }
                result
            }
            NodeKind::Field {
                name,
                field_type,
                required,
            } => format!("{}: {}{}", name, field_type, if *required { "!" } else { "" }),
            NodeKind::Index { fields } => {
                let fields: Vec<String> = fields.iter().map(|f| self.print_index_field(f)).collect();
                format!("@index({})", fields.join(", "))
            }
            NodeKind::Collection { name, items } => {
                format!("collection {} {}", name, self.print_block(items))
            }
        }
    }

    fn print_list(&self, nodes: &[Node]) -> String {
        nodes
            .iter()
            .map(|node| self.print(node))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn print_block(&self, nodes: &[Node]) -> String {
        format!("{{\n{}\n}}", self.print_all(nodes))
    }

    fn print_index_field(&self, field: &IndexField) -> String {
        match field.direction {
            Some(direction) => format!("[{}, {}]", field.name, direction.as_str()),
            None => field.name.clone(),
        }
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                c => vec![c],
            })
            .collect()
    }
}

fn needs_separator(previous: &Node, next: &str) -> bool {
    matches!(previous.kind, NodeKind::Return { value: None })
        || next.starts_with(['(', '[', '-'])
}

/// Renders one node as source text.
pub fn unparse(node: &Node) -> String {
    Unparser::new().print(node)
}

/// Renders a statement list, joining statements with newlines.
pub fn unparse_all(nodes: &[Node]) -> String {
    Unparser::new().print_all(nodes)
}

/// Renders an optional node; `None` renders as the empty string.
pub fn unparse_opt(node: Option<&Node>) -> String {
    node.map(unparse).unwrap_or_default()
}

use std::fmt;

use rust_decimal::Decimal;

use crate::ast::{BinaryKind, IndexField, Op, Position};

/// A node of the syntax tree.
///
/// Every node carries where it came from (`position`, `line_breaks`, `text`)
/// and the three flags shared by all expression shapes:
///
/// - `parenthesized` - the source wrapped the node in `( ... )`
/// - `bracket` - the node was reached through `[ ... ]` rather than `.`
/// - `prefix` - the expression this node chains from
///
/// `a.b.c` is the name `c` whose prefix is `b` whose prefix is `a`.
/// `a[0]` is the number `0` with `bracket` set and prefix `a`.
///
/// Equality is structural: `position`, `line_breaks` and `text` are ignored.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Position,
    pub line_breaks: usize,
    pub text: String,
    pub parenthesized: bool,
    pub bracket: bool,
    pub prefix: Option<Box<Node>>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.parenthesized == other.parenthesized
            && self.bracket == other.bracket
            && self.prefix == other.prefix
    }
}

/// A number literal, kept exactly as written.
///
/// Literals of any length are accepted; conversion to a numeric type happens
/// on demand and may fail or round.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number(String);

impl Number {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact decimal value, `None` when the literal does not fit a `Decimal`
    /// without rounding.
    pub fn to_decimal(&self) -> Option<Decimal> {
        Decimal::from_str_exact(&self.0).ok()
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl From<&str> for Number {
    fn from(text: &str) -> Self {
        Number(text.to_string())
    }
}

impl From<String> for Number {
    fn from(text: String) -> Self {
        Number(text)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number(value.to_string())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Integer or decimal number, source text preserved (`1.50` stays `1.50`)
    Number(Number),
    String(String),
    Boolean(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    // Literals and containers
    /// Array literal
    ///
    /// # Example
    /// ```text
    /// [1, 2, a]
    /// ```
    Array { items: Vec<Node> },

    /// Object literal, entries are `ObjectKeyValue` nodes
    ///
    /// # Example
    /// ```text
    /// { name: "x", age }
    /// ```
    Object { entries: Vec<Node> },

    /// One `key: value` entry of an object literal. The key is a `Name` or a
    /// string `Primitive`.
    ObjectKeyValue { key: Box<Node>, value: Box<Node> },

    Primitive(Primitive),

    // Expressions
    /// Binary operation, `op` is an `Operator` node
    Binary {
        kind: BinaryKind,
        left: Box<Node>,
        op: Box<Node>,
        right: Box<Node>,
    },

    /// Operator token of a binary or assignment node
    Operator(Op),

    /// `!value` or `not value`
    Not { value: Box<Node> },

    /// `-value`
    Negate { value: Box<Node> },

    /// Identifier, possibly chained from a prefix (`a.b`)
    Name(String),

    /// Call of the prefix expression
    ///
    /// # Example
    /// ```text
    /// a().b(c)
    /// ```
    Call { args: Vec<Node> },

    /// Bracketed key that already had its own prefix chain
    ///
    /// # Example
    /// ```text
    /// a[b.c]
    /// ```
    Computed { expression: Box<Node> },

    // Statements
    /// `return value`
    Return { value: Option<Box<Node>> },

    /// `const name = value`
    Const { name: String, value: Box<Node> },

    /// `let name = value`
    Let {
        name: String,
        value: Option<Box<Node>>,
    },

    /// `target = value`, `target += value`, `target -= value`
    Assign {
        left: Box<Node>,
        op: Box<Node>,
        right: Box<Node>,
    },

    /// `if expression { body }` followed by its `ElseIf`/`Else` clauses in
    /// source order
    If {
        expression: Box<Node>,
        body: Vec<Node>,
        elses: Vec<Node>,
    },

    /// `else if expression { body }`
    ElseIf {
        expression: Box<Node>,
        body: Vec<Node>,
    },

    /// `else { body }`
    Else { body: Vec<Node> },

    // Declarations
    /// `function name (params) { body }`
    Function {
        name: String,
        params: Vec<Node>,
        body: Vec<Node>,
    },

    /// Function parameter: `id`, `id: string`, `id?`
    Param {
        name: String,
        param_type: Option<String>,
        optional: bool,
    },

    /// Collection field: `name: string`, `age: number!`, `tags string[]`
    Field {
        name: String,
        field_type: String,
        required: bool,
    },

    /// `@index(name, [age, desc])`
    Index { fields: Vec<IndexField> },

    /// `collection Name { fields, indexes, functions }`
    Collection { name: String, items: Vec<Node> },
}

impl Node {
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Node {
            kind,
            position,
            line_breaks: 0,
            text: String::new(),
            parenthesized: false,
            bracket: false,
            prefix: None,
        }
    }

    /// Type name of the node, as exposed in JSON dumps and used by predicates.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Array { .. } => "array",
            NodeKind::Object { .. } => "object",
            NodeKind::ObjectKeyValue { .. } => "objectKeyValue",
            NodeKind::Primitive(Primitive::Number(_)) => "number",
            NodeKind::Primitive(Primitive::String(_)) => "string",
            NodeKind::Primitive(Primitive::Boolean(_)) => "boolean",
            NodeKind::Binary { kind, .. } => kind.as_str(),
            NodeKind::Operator(_) => "operator",
            NodeKind::Not { .. } => "not",
            NodeKind::Negate { .. } => "negate",
            NodeKind::Name(_) => "name",
            NodeKind::Call { .. } => "call",
            NodeKind::Computed { .. } => "computed",
            NodeKind::Return { .. } => "return",
            NodeKind::Const { .. } => "const",
            NodeKind::Let { .. } => "let",
            NodeKind::Assign { .. } => "assign",
            NodeKind::If { .. } => "if",
            NodeKind::ElseIf { .. } => "elseif",
            NodeKind::Else { .. } => "else",
            NodeKind::Function { .. } => "function",
            NodeKind::Param { .. } => "param",
            NodeKind::Field { .. } => "field",
            NodeKind::Index { .. } => "index",
            NodeKind::Collection { .. } => "collection",
        }
    }

    /// Name for `Name` nodes
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Whether the node may appear on the left of `=`, `+=` or `-=`.
    pub fn is_assignable(&self) -> bool {
        if self.parenthesized {
            return false;
        }
        match &self.kind {
            NodeKind::Name(_) => true,
            NodeKind::Call { .. } => false,
            _ => self.bracket,
        }
    }

    pub(crate) fn with_prefix(mut self, prefix: Node) -> Self {
        self.prefix = Some(Box::new(prefix));
        self
    }
}

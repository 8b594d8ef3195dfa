use crate::ast::TokenKind;

/// Operator carried by an `Operator` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Logical
    /// Logical OR (`||` or `or`)
    Or,
    /// Logical AND (`&&`)
    And,

    // Comparison
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    /// String concatenation (`&`)
    Concat,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Modulo (`%`)
    Modulo,
    /// Exponent (`^` or `**`)
    Power,

    // Assignment
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
}

impl Op {
    pub fn from_token(kind: TokenKind) -> Option<Op> {
        let op = match kind {
            TokenKind::Or => Op::Or,
            TokenKind::And => Op::And,
            TokenKind::EqEq => Op::Equal,
            TokenKind::NotEq => Op::NotEqual,
            TokenKind::Lt => Op::LessThan,
            TokenKind::LtEq => Op::LessEqual,
            TokenKind::Gt => Op::GreaterThan,
            TokenKind::GtEq => Op::GreaterEqual,
            TokenKind::Concat => Op::Concat,
            TokenKind::Plus => Op::Add,
            TokenKind::Minus => Op::Subtract,
            TokenKind::Star => Op::Multiply,
            TokenKind::Slash => Op::Divide,
            TokenKind::Percent => Op::Modulo,
            TokenKind::Power => Op::Power,
            TokenKind::Assign => Op::Assign,
            TokenKind::AddAssign => Op::AddAssign,
            TokenKind::SubAssign => Op::SubAssign,
            _ => return None,
        };
        Some(op)
    }

    /// Canonical spelling, used when an operator node has no source text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Op::Or => "||",
            Op::And => "&&",
            Op::Equal => "==",
            Op::NotEqual => "!=",
            Op::LessThan => "<",
            Op::LessEqual => "<=",
            Op::GreaterThan => ">",
            Op::GreaterEqual => ">=",
            Op::Concat => "&",
            Op::Add => "+",
            Op::Subtract => "-",
            Op::Multiply => "*",
            Op::Divide => "/",
            Op::Modulo => "%",
            Op::Power => "^",
            Op::Assign => "=",
            Op::AddAssign => "+=",
            Op::SubAssign => "-=",
        }
    }
}

/// Precedence family of a binary node. Doubles as the node's type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Or,
    And,
    Compare,
    Concat,
    Sum,
    Product,
    Power,
}

impl BinaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryKind::Or => "or",
            BinaryKind::And => "and",
            BinaryKind::Compare => "compare",
            BinaryKind::Concat => "concat",
            BinaryKind::Sum => "sum",
            BinaryKind::Product => "product",
            BinaryKind::Power => "power",
        }
    }
}

/// Prefix operators handled at the unary precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryKind {
    /// `!value` or `not value`
    Not,
    /// `-value`
    Negate,
}

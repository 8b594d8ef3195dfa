//! Grammar definition shared by the lexer and parser.
//!
//! A [`Grammar`] is built once by the caller and borrowed by every
//! [`Lexer`](crate::Lexer) and [`Parser`](crate::Parser) created from it. It
//! holds the compiled token patterns, the reserved words and the expression
//! precedence table. Nothing in it changes after construction, so one grammar
//! can serve any number of parses, including from several threads.
//!
//! # Examples
//!
//! ```
//! use schema_lang::{Grammar, Parser};
//!
//! let grammar = Grammar::new();
//! let nodes = Parser::new(&grammar, "a + 1").parse().unwrap();
//! assert_eq!(nodes[0].type_name(), "sum");
//! ```

use std::collections::HashMap;

use regex::Regex;

use crate::ast::{BinaryKind, Keyword, TokenKind, UnaryKind};

const NAME_PATTERN: &str = r"^[A-Za-z_$][A-Za-z0-9_$]*";
const NUMBER_PATTERN: &str = r"^(?:0|[1-9][0-9]*)(?:\.[0-9]+)?";

/// One row of the expression precedence table.
#[derive(Debug, Clone, PartialEq)]
pub enum Level {
    /// Left-associative binary operators of equal precedence
    Binary {
        kind: BinaryKind,
        operators: Vec<TokenKind>,
    },

    /// Prefix operators; the operand is parsed at the same level so they nest
    /// (`!!a`, `- -1`)
    Unary {
        operators: Vec<(TokenKind, UnaryKind)>,
    },
}

impl Level {
    pub fn binary(kind: BinaryKind, operators: &[TokenKind]) -> Self {
        Level::Binary {
            kind,
            operators: operators.to_vec(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    words: HashMap<&'static str, TokenKind>,
    name: Regex,
    number: Regex,
    levels: Vec<Level>,
}

impl Grammar {
    /// The standard grammar.
    pub fn new() -> Self {
        Self::with_levels(Self::default_levels())
    }

    /// A grammar with a custom expression precedence table, loosest first.
    pub fn with_levels(levels: Vec<Level>) -> Self {
        let mut words = HashMap::new();
        for keyword in [
            Keyword::Collection,
            Keyword::Function,
            Keyword::If,
            Keyword::Else,
            Keyword::Return,
            Keyword::Const,
            Keyword::Let,
        ] {
            words.insert(keyword.as_str(), TokenKind::Keyword(keyword));
        }
        words.insert("true", TokenKind::Boolean);
        words.insert("false", TokenKind::Boolean);
        words.insert("or", TokenKind::Or);
        words.insert("not", TokenKind::Not);

        Grammar {
            words,
            name: Regex::new(NAME_PATTERN).expect("name pattern is a valid regex"),
            number: Regex::new(NUMBER_PATTERN).expect("number pattern is a valid regex"),
            levels,
        }
    }

    /// Precedence table, loosest first:
    /// or, and, comparison, concatenation, sum, product, unary, power.
    pub fn default_levels() -> Vec<Level> {
        use TokenKind::*;

        vec![
            Level::binary(BinaryKind::Or, &[Or]),
            Level::binary(BinaryKind::And, &[And]),
            Level::binary(BinaryKind::Compare, &[EqEq, NotEq, Lt, LtEq, Gt, GtEq]),
            Level::binary(BinaryKind::Concat, &[Concat]),
            Level::binary(BinaryKind::Sum, &[Plus, Minus]),
            Level::binary(BinaryKind::Product, &[Star, Slash, Percent]),
            Level::Unary {
                operators: vec![(Not, UnaryKind::Not), (Minus, UnaryKind::Negate)],
            },
            Level::binary(BinaryKind::Power, &[Power]),
        ]
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Token kind of a reserved word (`collection`, `or`, `true`, ...).
    pub fn word(&self, word: &str) -> Option<TokenKind> {
        self.words.get(word).copied()
    }

    /// Length of the name at the start of `rest`, if any.
    pub(crate) fn match_name(&self, rest: &str) -> Option<usize> {
        self.name.find(rest).map(|m| m.end())
    }

    /// Length of the number at the start of `rest`, if any.
    pub(crate) fn match_number(&self, rest: &str) -> Option<usize> {
        self.number.find(rest).map(|m| m.end())
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

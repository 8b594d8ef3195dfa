pub mod ast;
pub mod cli;
pub mod grammar;
pub mod lexer;
pub mod parser;
pub mod tree;
pub mod unparse;
pub mod validate;

pub use ast::{Node, NodeKind, Position, Primitive, Token, TokenKind, find_collection};
pub use grammar::{Grammar, Level};
pub use lexer::{LexError, Lexer};
pub use parser::{Ambiguity, ParseError, ParseOutput, Parser, parse};
pub use tree::{Slot, filter_all, filter_nodes, map_all, map_nodes};
pub use unparse::{Unparser, unparse, unparse_all, unparse_opt};
pub use validate::{ValidationError, check_call, check_call_arity, validate_record};

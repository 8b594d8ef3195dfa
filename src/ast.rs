//! # Schema Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the schema language
//! used to declare collections, their fields and indexes, and the functions
//! that validate or update records.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[node]** - The [`Node`] struct and its [`NodeKind`] variants
//! - **[operators]** - Binary, unary and assignment operators
//! - **[schema]** - Collection helpers (fields, functions, indexes)
//!
//! ## Quick Start
//!
//! ```text
//! collection Account {
//!   name: string!
//!   balance: number
//!   @index(name, [balance, desc])
//!
//!   function transfer (to, amount) {
//!     if amount > this.balance {
//!       return false
//!     }
//!     this.balance -= amount
//!     to.balance += amount
//!   }
//! }
//! ```
//!
//! ## Prefix Chains
//!
//! Member access and calls are not nested "object" nodes. Each node points
//! back at the expression it chains from through `prefix`:
//!
//! ```text
//! a.b(c)[0]
//! ```
//!
//! is the number `0` (`bracket` set) whose prefix is a `call` with args `[c]`,
//! whose prefix is the name `b`, whose prefix is the name `a`.
//!
//! ## Expression Precedence
//!
//! From loosest to tightest, all left-associative:
//!
//! ```text
//! || or    &&    == != < <= > >=    &    + -    * / %    ! not -    ^ **
//! ```
pub mod node;
pub mod operators;
pub mod schema;
pub mod tokens;

pub use node::{Node, NodeKind, Number, Primitive};
pub use operators::{BinaryKind, Op, UnaryKind};
pub use schema::{Direction, IndexField, find_collection};
pub use tokens::{Keyword, Position, Token, TokenKind};

//! BPL IR - shared data structures for the interpreter pipeline.
//!
//! This crate contains the types every phase agrees on:
//! - `Span` (byte ranges) and `Position` (1-based line/column)
//! - `Name` and `StringInterner` for identifiers and string literals
//! - `Token`, `TokenKind` and `TokenList` produced by the lexer
//! - the AST produced by the parser and walked by the evaluator
//!
//! Identifiers and string literals are interned, so comparing two names is a
//! `u32` comparison. Float literals in tokens are stored as bits so that
//! `TokenKind` can be `Eq + Hash`.

pub mod ast;
mod interner;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, Block, Expr, ExprKind, FunctionDef, Ident, Literal, Program, Stmt, StmtKind,
    UnaryOp,
};
pub use interner::StringInterner;
pub use name::Name;
pub use span::{Position, Span};
pub use token::{Token, TokenKind, TokenList};

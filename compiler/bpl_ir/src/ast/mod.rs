//! Abstract syntax tree.
//!
//! Produced only by the parser and consumed only by the evaluator. Every node
//! records the position of its first token at construction; nodes are never
//! mutated afterwards.
//!
//! Function bodies are shared through `Rc<FunctionDef>` so a closure value can
//! hold its body without copying the tree.

mod operators;

use std::rc::Rc;

use crate::{Name, Position};

pub use operators::{BinaryOp, UnaryOp};

/// Root node: the top-level statements of one source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub pos: Position,
}

/// Statements of one indentation level.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub pos: Position,
}

/// An identifier occurrence in binding position (assignment target,
/// function name, parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: Name,
    pub pos: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub pos: Position,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, pos: Position) -> Self {
        Stmt { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// Expression evaluated for its effect.
    Expr(Expr),
    /// `name = value`
    Assign { target: Ident, value: Expr },
    /// `যদি cond: ... নইলে: ...`; an else-if is an `If` alone in `else_block`.
    If {
        condition: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    /// `যখন cond: ...`
    While { condition: Expr, body: Block },
    /// `ফাংশন name(params): ...`
    FunctionDef(Rc<FunctionDef>),
    /// `ফলাফল [value]`
    Return(Option<Expr>),
}

/// A function definition.
#[derive(Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Block,
    pub pos: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: Position,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, pos: Position) -> Self {
        Expr { kind, pos }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Ident(Name),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(Name),
    Bool(bool),
    Nil,
}

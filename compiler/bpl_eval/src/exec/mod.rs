//! Statement execution and expression evaluation.

mod call;
mod control;
mod expr;

use bpl_ir::{Block, Stmt, StmtKind};

use crate::errors::EvalError;
use crate::{Interpreter, Value};

/// How a statement finished.
#[derive(Debug)]
pub(crate) enum Flow {
    Normal,
    /// A `ফলাফল` is unwinding to the enclosing call.
    Return(Value),
}

impl Interpreter<'_> {
    pub(crate) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, EvalError> {
        let flow = match &stmt.kind {
            StmtKind::Expr(expr) => self.eval_expr(expr).map(|_| Flow::Normal),
            StmtKind::Assign { target, value } => self.eval_expr(value).map(|value| {
                self.env.assign(target.name, value);
                Flow::Normal
            }),
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => self.exec_if(condition, then_block, else_block.as_ref()),
            StmtKind::While { condition, body } => self.exec_while(condition, body),
            StmtKind::FunctionDef(def) => {
                self.define_function(def);
                Ok(Flow::Normal)
            }
            StmtKind::Return(value) => self.exec_return(value.as_ref()),
        };
        flow.map_err(|err| err.at(stmt.pos))
    }

    /// Run statements in the current scope, stopping at the first return.
    pub(crate) fn exec_statements(&mut self, statements: &[Stmt]) -> Result<Flow, EvalError> {
        for stmt in statements {
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Run a block in a fresh child scope of the current one.
    pub(crate) fn exec_block(&mut self, block: &Block) -> Result<Flow, EvalError> {
        self.env.push_scope();
        let flow = self.exec_statements(&block.statements);
        self.env.pop_scope();
        flow
    }
}

//! Control flow and definitions: `যদি`, `যখন`, `ফলাফল`, `ফাংশন`.

use std::rc::Rc;

use bpl_ir::{Block, Expr, FunctionDef};

use super::Flow;
use crate::errors::{return_outside_function, EvalError};
use crate::value::FunctionValue;
use crate::{Interpreter, Value};

impl Interpreter<'_> {
    pub(super) fn exec_if(
        &mut self,
        condition: &Expr,
        then_block: &Block,
        else_block: Option<&Block>,
    ) -> Result<Flow, EvalError> {
        if self.eval_expr(condition)?.is_truthy() {
            self.exec_block(then_block)
        } else if let Some(else_block) = else_block {
            self.exec_block(else_block)
        } else {
            Ok(Flow::Normal)
        }
    }

    /// Each iteration runs the body in a fresh scope. There is no
    /// iteration cap.
    pub(super) fn exec_while(&mut self, condition: &Expr, body: &Block) -> Result<Flow, EvalError> {
        while self.eval_expr(condition)?.is_truthy() {
            if let Flow::Return(value) = self.exec_block(body)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    pub(super) fn exec_return(&mut self, value: Option<&Expr>) -> Result<Flow, EvalError> {
        if self.call_stack.is_empty() {
            return Err(return_outside_function());
        }
        let value = match value {
            Some(expr) => self.eval_expr(expr)?,
            None => Value::Nil,
        };
        Ok(Flow::Return(value))
    }

    /// Bind the function in the current scope, capturing that scope.
    pub(super) fn define_function(&mut self, def: &Rc<FunctionDef>) {
        let name = def.name.name;
        let func = FunctionValue::new(
            self.interner.lookup(name),
            Rc::clone(def),
            self.env.current_scope().clone(),
        );
        self.env.define(name, Value::Function(Rc::new(func)));
    }
}

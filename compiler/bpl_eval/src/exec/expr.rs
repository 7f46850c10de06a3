//! Expression evaluation.

use bpl_ir::{BinaryOp, Expr, ExprKind, Literal, Name};
use bpl_stack::ensure_sufficient_stack;

use crate::errors::{undefined_variable, EvalResult};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;
use crate::{Interpreter, Value};

impl Interpreter<'_> {
    /// Evaluate an expression. Errors leave with this node's position
    /// unless a nested node already set one.
    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr)).map_err(|err| err.at(expr.pos))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(self.eval_literal(literal)),
            ExprKind::Ident(name) => self.eval_ident(*name),
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                evaluate_unary(&value, *op)
            }
            ExprKind::Call { callee, args } => self.eval_call(callee, args, expr.pos),
        }
    }

    fn eval_literal(&self, literal: &Literal) -> Value {
        match *literal {
            Literal::Int(n) => Value::Int(n),
            Literal::Float(x) => Value::Float(x),
            Literal::Str(name) => Value::string(self.interner.lookup(name)),
            Literal::Bool(b) => Value::Bool(b),
            Literal::Nil => Value::Nil,
        }
    }

    /// Scope chain first, innermost out; builtins only on a miss.
    fn eval_ident(&self, name: Name) -> EvalResult {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        self.builtins
            .get(name)
            .map(Value::Builtin)
            .ok_or_else(|| undefined_variable(self.interner.lookup(name)))
    }

    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        let lhs = self.eval_expr(left)?;
        match op {
            BinaryOp::And if !lhs.is_truthy() => Ok(Value::Bool(false)),
            BinaryOp::Or if lhs.is_truthy() => Ok(Value::Bool(true)),
            BinaryOp::And | BinaryOp::Or => Ok(Value::Bool(self.eval_expr(right)?.is_truthy())),
            _ => {
                let rhs = self.eval_expr(right)?;
                evaluate_binary(&lhs, &rhs, op)
            }
        }
    }
}

//! Function calls.

use bpl_ir::{Expr, Position};
use smallvec::SmallVec;
use tracing::trace;

use super::Flow;
use crate::diagnostics::CallFrame;
use crate::errors::{not_callable, wrong_arg_count, EvalError, EvalResult};
use crate::value::FunctionValue;
use crate::{Interpreter, Value};

type Args = SmallVec<[Value; 4]>;

impl Interpreter<'_> {
    /// Evaluate the callee, check it is callable, then evaluate the
    /// arguments left to right.
    pub(super) fn eval_call(&mut self, callee: &Expr, args: &[Expr], pos: Position) -> EvalResult {
        match self.eval_expr(callee)? {
            Value::Function(func) => {
                let args = self.eval_args(args)?;
                self.call_function(&func, args, pos)
            }
            Value::Builtin(builtin) => {
                let args = self.eval_args(args)?;
                builtin.call(&args, &self.print_handler)
            }
            other => Err(not_callable(other.type_name())),
        }
    }

    fn eval_args(&mut self, args: &[Expr]) -> Result<Args, EvalError> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    /// Call a user function.
    ///
    /// The call scope is a child of the function's captured scope, never of
    /// the caller's. Parameters are bound there and the body runs directly
    /// in it.
    pub(crate) fn call_function(
        &mut self,
        func: &FunctionValue,
        args: Args,
        call_pos: Position,
    ) -> EvalResult {
        let decl = func.decl();
        if args.len() != func.arity() {
            return Err(wrong_arg_count(func.name(), func.arity(), args.len()));
        }
        self.call_stack.push(CallFrame {
            name: decl.name.name,
            call_pos,
        })?;
        trace!(
            function = func.name(),
            args = args.len(),
            depth = self.call_stack.depth(),
            "call"
        );

        self.env.push_call_scope(func.env().clone());
        for (param, value) in decl.params.iter().zip(args) {
            self.env.define(param.name, value);
        }
        let result = match self.exec_statements(&decl.body.statements) {
            Ok(Flow::Return(value)) => Ok(value),
            Ok(Flow::Normal) => Ok(Value::Nil),
            Err(err) if err.backtrace.is_none() => {
                Err(err.with_backtrace(self.call_stack.capture(self.interner)))
            }
            Err(err) => Err(err),
        };
        self.env.pop_scope();
        self.call_stack.pop();
        result
    }
}

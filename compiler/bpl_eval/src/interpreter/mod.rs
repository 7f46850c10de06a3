//! The tree-walking interpreter.
//!
//! One `Interpreter` owns the global environment, the builtin registry, the
//! print handler and the user-function call stack. Global bindings persist
//! across `eval_program` calls, so a driver can feed it programs one after
//! another.

mod builder;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

use bpl_ir::{Program, StmtKind, StringInterner};
use tracing::debug;

use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::exec::Flow;
use crate::print_handler::SharedPrintHandler;
use crate::Value;

pub struct Interpreter<'a> {
    pub(crate) interner: &'a StringInterner,
    pub(crate) env: Environment,
    pub(crate) builtins: BuiltinRegistry,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) call_stack: CallStack,
}

impl<'a> Interpreter<'a> {
    /// Create an interpreter printing to stdout with default limits.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn builder(interner: &'a StringInterner) -> InterpreterBuilder<'a> {
        InterpreterBuilder::new(interner)
    }

    /// Execute a program.
    ///
    /// Returns the value of the last top-level expression statement, or
    /// `নিল` when there is none. Output already printed before a runtime
    /// error stays printed.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn eval_program(&mut self, program: &Program) -> EvalResult {
        self.env.reset_to_global();
        self.call_stack.clear();

        let mut last = Value::Nil;
        for stmt in &program.statements {
            let outcome = match &stmt.kind {
                StmtKind::Expr(expr) => self.eval_expr(expr).map(|value| last = value),
                _ => self.exec_stmt(stmt).map(|flow| {
                    debug_assert!(matches!(flow, Flow::Normal), "return escaped to top level");
                }),
            };
            if let Err(err) = outcome {
                debug!(%err, "evaluation failed");
                return Err(err);
            }
        }
        debug!(result = ?last, "evaluation finished");
        Ok(last)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn max_call_depth(&self) -> usize {
        self.call_stack.max_depth()
    }

    /// Look up a global binding by name.
    pub fn global(&self, name: &str) -> Option<Value> {
        let name = self.interner.get(name)?;
        self.env.global().borrow().lookup(name)
    }
}

#[cfg(test)]
mod tests;

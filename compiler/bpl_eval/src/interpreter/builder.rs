//! `InterpreterBuilder` for creating `Interpreter` instances.

use bpl_ir::StringInterner;

use super::Interpreter;
use crate::builtins::BuiltinRegistry;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Default cap on nested user-function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Builder for creating `Interpreter` instances.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Set where `দেখাও` writes. Defaults to stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the maximum depth of nested user-function calls. Exceeding it is
    /// a `StackOverflow` runtime error.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        Interpreter {
            interner: self.interner,
            env: Environment::new(),
            builtins: BuiltinRegistry::new(self.interner),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(self.max_call_depth),
        }
    }
}

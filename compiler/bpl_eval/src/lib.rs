#![deny(clippy::arithmetic_side_effects)]
//! BPL Eval - tree-walking interpreter for BPL programs.
//!
//! # Architecture
//!
//! - `Environment`: a stack of active scopes over a chain of shared,
//!   reference-counted scope records
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `Builtin`: the fixed builtin registry (`দেখাও`, `প্রকার`)
//! - `PrintHandler`: output sink for `দেখাও`
//! - `Interpreter`: statement execution, calls, closures and the call stack

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
mod exec;
mod interpreter;
mod operators;
mod print_handler;
mod unary_operators;
mod value;

pub use builtins::Builtin;
pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, LocalScope, Scope};
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{FunctionValue, Value};

#[cfg(test)]
mod tests;

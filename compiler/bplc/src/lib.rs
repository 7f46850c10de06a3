//! BPL driver.
//!
//! [`Session`] chains the phases for one source text:
//!
//! ```text
//! source → bpl_lexer::lex → bpl_parse::parse → Interpreter::eval_program → Value
//! ```
//!
//! Every phase failure is folded into [`Error`], which knows its position and
//! how to become a [`Diagnostic`].

pub mod commands;
mod tracing_setup;

use bpl_diagnostic::{Diagnostic, ErrorCode};
use bpl_eval::{stdout_handler, EvalError, Interpreter, SharedPrintHandler, Value};
use bpl_ir::{Position, Program, StringInterner, TokenList};
use bpl_lexer::{ConfigError, KeywordTable, LexError};
use bpl_parse::ParseError;

pub use bpl_eval::DEFAULT_MAX_CALL_DEPTH;
pub use tracing_setup::init_tracing;

/// Any failure of the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),
    #[error("runtime error: {0}")]
    Runtime(#[from] EvalError),
}

impl Error {
    /// Source position of the failure. Only configuration errors have none.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Config(_) => None,
            Error::Lex(err) => Some(err.pos),
            Error::Syntax(err) => Some(err.pos),
            Error::Runtime(err) => err.pos,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Config(err) => err.code(),
            Error::Lex(err) => err.code(),
            Error::Syntax(err) => err.code(),
            Error::Runtime(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::Config(err) => err.to_diagnostic(),
            Error::Lex(err) => err.to_diagnostic(),
            Error::Syntax(err) => err.to_diagnostic(),
            Error::Runtime(err) => err.to_diagnostic(),
        }
    }
}

/// One interpreter session: an interner, the keyword table and the
/// evaluation settings.
///
/// Each [`Session::run`] evaluates in a fresh global environment.
pub struct Session {
    interner: StringInterner,
    keywords: &'static KeywordTable,
    print_handler: SharedPrintHandler,
    max_call_depth: usize,
}

impl Session {
    /// Create a session printing to stdout.
    ///
    /// Fails only if the built-in keyword table is ambiguous.
    pub fn new() -> Result<Self, Error> {
        Ok(Session {
            interner: StringInterner::new(),
            keywords: KeywordTable::builtin()?,
            print_handler: stdout_handler(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        })
    }

    #[must_use]
    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = handler;
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn lex(&self, source: &str) -> Result<TokenList, Error> {
        Ok(bpl_lexer::lex(source, self.keywords, &self.interner)?)
    }

    pub fn parse(&self, source: &str) -> Result<Program, Error> {
        let tokens = self.lex(source)?;
        Ok(bpl_parse::parse(&tokens, &self.interner)?)
    }

    /// Lex, parse and evaluate `source`.
    ///
    /// Nothing is evaluated unless lexing and parsing both succeed.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&self, source: &str) -> Result<Value, Error> {
        let program = self.parse(source)?;
        let mut interpreter = Interpreter::builder(&self.interner)
            .print_handler(self.print_handler.clone())
            .max_call_depth(self.max_call_depth)
            .build();
        Ok(interpreter.eval_program(&program)?)
    }
}

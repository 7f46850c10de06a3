//! Recursive descent parser for BPL.
//!
//! Consumes the token stream produced by `bpl_lexer` (with `Newline`,
//! `Indent` and `Dedent` already resolved) and builds a [`Program`].
//! Parsing stops at the first error.

mod cursor;
mod error;
mod grammar;

pub use cursor::Cursor;
pub use error::{ErrorContext, ParseError, ParseErrorKind};

use bpl_ir::{Program, StringInterner, TokenList};

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
        }
    }

    /// Run a sub-parser, tagging any error with the construct it belongs to.
    fn in_error_context<T>(
        &mut self,
        context: ErrorContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        f(self).map_err(|e| e.in_context(context))
    }
}

/// Parse a token stream into a program.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<Program, ParseError> {
    let result = Parser::new(tokens, interner).parse_program();
    match &result {
        Ok(program) => tracing::debug!(statements = program.statements.len(), "parsed"),
        Err(err) => tracing::debug!(%err, pos = %err.pos, "parse failed"),
    }
    result
}

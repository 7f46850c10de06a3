//! Lexer error types.
//!
//! Every error carries the byte span of the offending text and the 1-based
//! position the user should look at. Unterminated literals are anchored at
//! the opening quote.

use std::fmt;

use bpl_diagnostic::{Diagnostic, ErrorCode};
use bpl_ir::{Position, Span};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    pub pos: Position,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// Missing closing quote before the end of the line.
    UnterminatedString { quote: char },
    /// A character that starts no token.
    InvalidCharacter(char),
    /// Digits followed by `.` with no fractional digits.
    MalformedNumber,
    /// Integer literal outside the `i64` range.
    IntegerOverflow,
    /// Dedent to a width that matches no enclosing indentation level.
    InconsistentDedent { width: u32 },
    /// Indentation increase on a line that does not open a block.
    UnexpectedIndent,
}

impl LexError {
    #[cold]
    pub fn unterminated_string(quote: char, span: Span, pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString { quote },
            span,
            pos,
        }
    }

    #[cold]
    pub fn invalid_character(c: char, span: Span, pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::InvalidCharacter(c),
            span,
            pos,
        }
    }

    #[cold]
    pub fn malformed_number(span: Span, pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::MalformedNumber,
            span,
            pos,
        }
    }

    #[cold]
    pub fn integer_overflow(span: Span, pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::IntegerOverflow,
            span,
            pos,
        }
    }

    #[cold]
    pub fn inconsistent_dedent(width: u32, span: Span, pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::InconsistentDedent { width },
            span,
            pos,
        }
    }

    #[cold]
    pub fn unexpected_indent(span: Span, pos: Position) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedIndent,
            span,
            pos,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString { .. } => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0002,
            LexErrorKind::MalformedNumber | LexErrorKind::IntegerOverflow => ErrorCode::E0003,
            LexErrorKind::InconsistentDedent { .. } => ErrorCode::E0004,
            LexErrorKind::UnexpectedIndent => ErrorCode::E0005,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at(self.pos)
            .with_span(self.span);
        match self.kind {
            LexErrorKind::UnterminatedString { quote } => {
                diag.with_suggestion(format!("add a closing `{quote}` before the end of the line"))
            }
            LexErrorKind::MalformedNumber => {
                diag.with_suggestion("write at least one digit after the decimal point")
            }
            LexErrorKind::InconsistentDedent { .. } => diag.with_note(
                "a dedent must return to the indentation of an enclosing block",
            ),
            LexErrorKind::UnexpectedIndent => {
                diag.with_note("only the line after one ending in `:` may be indented further")
            }
            LexErrorKind::InvalidCharacter(_) | LexErrorKind::IntegerOverflow => diag,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnterminatedString { .. } => write!(f, "unterminated string literal"),
            LexErrorKind::InvalidCharacter(c) => {
                write!(f, "invalid character `{c}` (U+{:04X})", u32::from(*c))
            }
            LexErrorKind::MalformedNumber => write!(f, "malformed number literal"),
            LexErrorKind::IntegerOverflow => {
                write!(f, "integer literal does not fit in 64 bits")
            }
            LexErrorKind::InconsistentDedent { width } => write!(
                f,
                "inconsistent indentation: width {width} matches no enclosing block"
            ),
            LexErrorKind::UnexpectedIndent => write!(f, "unexpected indent"),
        }
    }
}

impl std::error::Error for LexError {}

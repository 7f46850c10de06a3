//! Parse error types.
//!
//! The parser stops at the first error. Each error names the offending
//! token, its position, and (when known) the construct being parsed, for
//! "while parsing X" notes.

use std::fmt;

use bpl_diagnostic::{Diagnostic, ErrorCode};
use bpl_ir::{Position, Span};

/// The construct being parsed when an error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    FunctionDef,
    IfStatement,
    WhileLoop,
    ReturnStatement,
    Assignment,
    FunctionCall,
    Parenthesized,
}

impl ErrorContext {
    /// Phrase suitable for "while parsing {description}".
    pub fn description(self) -> &'static str {
        match self {
            Self::FunctionDef => "a function definition",
            Self::IfStatement => "an if statement",
            Self::WhileLoop => "a while loop",
            Self::ReturnStatement => "a return statement",
            Self::Assignment => "an assignment",
            Self::FunctionCall => "a function call",
            Self::Parenthesized => "a parenthesized expression",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub pos: Position,
    pub context: Option<ErrorContext>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A specific token was required.
    UnexpectedToken { expected: &'static str, found: String },
    /// No expression can start with the current token.
    ExpectedExpression { found: String },
    /// `:` and a newline were not followed by an indented block.
    ExpectedIndentedBlock { found: String },
    /// A block with no statements.
    EmptyBlock,
    /// Left side of `=` is not a bare name.
    InvalidAssignmentTarget,
    /// A parameter name appears twice in one function definition.
    DuplicateParameter { name: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span, pos: Position) -> Self {
        ParseError {
            kind,
            span,
            pos,
            context: None,
        }
    }

    /// Record the enclosing construct unless a more specific one is set.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseErrorKind::ExpectedIndentedBlock { .. } => ErrorCode::E1003,
            ParseErrorKind::EmptyBlock => ErrorCode::E1004,
            ParseErrorKind::InvalidAssignmentTarget => ErrorCode::E1005,
            ParseErrorKind::DuplicateParameter { .. } => ErrorCode::E1006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at(self.pos)
            .with_span(self.span);
        if let Some(context) = self.context {
            diag = diag.with_note(format!("while parsing {}", context.description()));
        }
        match self.kind {
            ParseErrorKind::ExpectedIndentedBlock { .. } | ParseErrorKind::EmptyBlock => diag
                .with_suggestion("indent the statements of the block further than the line with `:`"),
            ParseErrorKind::InvalidAssignmentTarget => {
                diag.with_suggestion("assign to a variable name, e.g. `মান = ১`")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::ExpectedExpression { found } => {
                write!(f, "expected expression, found {found}")
            }
            ParseErrorKind::ExpectedIndentedBlock { found } => {
                write!(f, "expected an indented block, found {found}")
            }
            ParseErrorKind::EmptyBlock => write!(f, "block has no statements"),
            ParseErrorKind::InvalidAssignmentTarget => {
                write!(f, "invalid assignment target: only a name can be assigned to")
            }
            ParseErrorKind::DuplicateParameter { name } => {
                write!(f, "parameter `{name}` is declared more than once")
            }
        }
    }
}

impl std::error::Error for ParseError {}

//! Runtime error types.
//!
//! Error constructors are free `#[cold]` functions. They build errors
//! without a position; the interpreter attaches the position of the node
//! being evaluated (innermost first) and, for errors raised inside user
//! functions, a snapshot of the call stack.

use std::fmt;

use bpl_diagnostic::{Diagnostic, ErrorCode};
use bpl_ir::{BinaryOp, Position, UnaryOp};

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Number of backtrace frames rendered in a diagnostic.
const MAX_RENDERED_FRAMES: usize = 8;

/// Typed runtime error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    UndefinedVariable {
        name: String,
    },
    BinaryTypeMismatch {
        op: BinaryOp,
        left: &'static str,
        right: &'static str,
    },
    InvalidUnaryOperand {
        op: UnaryOp,
        operand: &'static str,
    },
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow {
        operation: &'static str,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    NotCallable {
        type_name: &'static str,
    },
    ReturnOutsideFunction,
    StackOverflow {
        depth: usize,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::BinaryTypeMismatch { op, left, right } => write!(
                f,
                "operator `{}` cannot be applied to {left} and {right}",
                op.as_symbol()
            ),
            Self::InvalidUnaryOperand { op, operand } => write!(
                f,
                "operator `{}` cannot be applied to {operand}",
                op.as_symbol()
            ),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::ReturnOutsideFunction => {
                write!(f, "`ফলাফল` used outside of a function body")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name.
    pub name: String,
    /// Position of the call site.
    pub call_pos: Option<Position>,
}

/// Snapshot of the user-function call stack at an error site, innermost
/// call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for BacktraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "in {}", self.name)?;
        if let Some(pos) = self.call_pos {
            write!(f, " called at {pos}")?;
        }
        Ok(())
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {frame}")?;
        }
        Ok(())
    }
}

/// Runtime error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Position of the innermost node that was being evaluated.
    pub pos: Option<Position>,
    /// Active user-function calls at the error site.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            pos: None,
            backtrace: None,
        }
    }

    /// Attach a position unless a more precise one is already set.
    #[must_use]
    pub fn at(mut self, pos: Position) -> Self {
        self.pos.get_or_insert(pos);
        self
    }

    /// Attach a backtrace unless one was captured deeper in the stack.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        if self.backtrace.is_none() && !backtrace.is_empty() {
            self.backtrace = Some(backtrace);
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            EvalErrorKind::UndefinedVariable { .. } => ErrorCode::E6001,
            EvalErrorKind::BinaryTypeMismatch { .. } | EvalErrorKind::InvalidUnaryOperand { .. } => {
                ErrorCode::E6002
            }
            EvalErrorKind::DivisionByZero | EvalErrorKind::ModuloByZero => ErrorCode::E6003,
            EvalErrorKind::ArityMismatch { .. } => ErrorCode::E6004,
            EvalErrorKind::NotCallable { .. } => ErrorCode::E6005,
            EvalErrorKind::ReturnOutsideFunction => ErrorCode::E6006,
            EvalErrorKind::StackOverflow { .. } => ErrorCode::E6007,
            EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E6008,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.kind.to_string());
        if let Some(pos) = self.pos {
            diag = diag.at(pos);
        }
        if let Some(backtrace) = &self.backtrace {
            for frame in backtrace.frames().iter().take(MAX_RENDERED_FRAMES) {
                diag = diag.with_note(frame.to_string());
            }
            if backtrace.len() > MAX_RENDERED_FRAMES {
                let hidden = backtrace.len().saturating_sub(MAX_RENDERED_FRAMES);
                diag = diag.with_note(format!("... {hidden} more calls"));
            }
        }
        match &self.kind {
            EvalErrorKind::UndefinedVariable { .. } => {
                diag.with_suggestion("assign the variable with `=` before using it")
            }
            EvalErrorKind::StackOverflow { .. } => {
                diag.with_suggestion("check that the recursion has a reachable base case")
            }
            _ => diag,
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{} at {pos}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}

// Error constructors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    })
}

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: &'static str, right: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch { op, left, right })
}

#[cold]
pub fn invalid_unary_operand(op: UnaryOp, operand: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOperand { op, operand })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

#[cold]
pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(type_name: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable { type_name })
}

#[cold]
pub fn return_outside_function() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnOutsideFunction)
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth: limit })
}

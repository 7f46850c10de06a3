//! Diagnostics shared by every phase.
//!
//! Each phase error converts into a [`Diagnostic`]: a stable [`ErrorCode`],
//! a one-line message, the source position, and optional notes and help.
//! [`Diagnostic::render`] turns one into the text the CLI prints.

mod diagnostic;
mod error_code;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;

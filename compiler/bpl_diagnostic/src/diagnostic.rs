use std::fmt::{self, Write as _};

use bpl_ir::{Position, Span};

use crate::ErrorCode;

/// A user-facing error report.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Main error message.
    pub message: String,
    /// Where the error occurred.
    pub pos: Option<Position>,
    /// Byte range to underline, when known.
    pub span: Option<Span>,
    /// Additional context, rendered after the snippet.
    pub notes: Vec<String>,
    /// Human-readable suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// Create an error diagnostic with the given code.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: String::new(),
            pos: None,
            span: None,
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Set the main message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the source position.
    pub fn at(mut self, pos: Position) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Set the span to underline.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Add a note providing additional context.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Render as plain text with a source snippet.
    ///
    /// ```text
    /// error[E6001]: undefined variable `xyz`
    ///  --> main.bpl:1:7
    ///   |
    /// 1 | দেখাও(xyz)
    ///   |       ^^^
    /// ```
    pub fn render(&self, source: &str, path: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "error[{}]: {}", self.code, self.message);

        if let Some(pos) = self.pos {
            let gutter = " ".repeat(pos.line.to_string().len());
            let _ = writeln!(out, "{gutter}--> {path}:{pos}");

            let line_index = (pos.line as usize).saturating_sub(1);
            if let Some(line) = source.lines().nth(line_index) {
                let _ = writeln!(out, "{gutter} |");
                let _ = writeln!(out, "{} | {}", pos.line, line);
                let _ = writeln!(
                    out,
                    "{gutter} | {}{}",
                    caret_padding(line, pos.column),
                    "^".repeat(self.underline_width(source))
                );
            }
        }

        for note in &self.notes {
            let _ = writeln!(out, "  = note: {note}");
        }
        for suggestion in &self.suggestions {
            let _ = writeln!(out, "  = help: {suggestion}");
        }
        out
    }

    /// Number of carets: the span's length in characters when it stays on
    /// one line, otherwise one.
    fn underline_width(&self, source: &str) -> usize {
        self.span
            .and_then(|span| source.get(span.to_range()))
            .filter(|text| !text.contains('\n'))
            .map_or(1, |text| text.chars().count().max(1))
    }
}

/// Whitespace that lines the caret up under `column`, keeping tabs as tabs.
fn caret_padding(line: &str, column: u32) -> String {
    line.chars()
        .take((column as usize).saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "error[{}] at {}: {}", self.code, pos, self.message),
            None => write!(f, "error[{}]: {}", self.code, self.message),
        }
    }
}

//! Raw token definition.
//!
//! The `RawToken` enum is the logos-derived scanner output, before keyword
//! resolution, literal decoding and layout.

use logos::Logos;

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")] // Horizontal whitespace; indentation is measured from the source
pub(crate) enum RawToken {
    #[regex(r"#[^\n]*")]
    Comment,

    #[token("\n")]
    Newline,

    // Operators
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    // Numbers (ASCII or Bengali digits)
    #[regex(r"[0-9০-৯]+")]
    Int,
    #[regex(r"[0-9০-৯]+\.[0-9০-৯]+")]
    Float,
    #[regex(r"[0-9০-৯]+\.")]
    MalformedNumber,

    // Strings may not span lines
    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*'"#)]
    Str,
    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    #[regex(r#"'([^'\\\n]|\\[^\n])*"#)]
    UnterminatedStr,

    // Identifiers and keywords: a letter or `_`, then letters, marks,
    // digits, `_` or zero-width joiners
    #[regex(r"[\p{L}_][\p{L}\p{M}\p{Nd}_\x{200C}\x{200D}]*")]
    Ident,
}

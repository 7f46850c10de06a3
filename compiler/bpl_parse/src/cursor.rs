//! Token cursor for navigating the token stream.

use bpl_ir::{Ident, Position, Span, StringInterner, Token, TokenKind, TokenList};
use tracing::trace;

use crate::error::{ParseError, ParseErrorKind};

/// Returned when the cursor runs past a token list that lacks `Eof`.
static EOF: Token = Token {
    kind: TokenKind::Eof,
    span: Span::DUMMY,
    pos: Position::START,
};

/// Cursor for navigating tokens.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    /// The current token; `Eof` once the stream is exhausted.
    #[inline]
    pub fn current(&self) -> &'a Token {
        self.tokens.get(self.pos).unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_pos(&self) -> Position {
        self.current().pos
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Check the current token against a payload-free kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume and return the current token. `Eof` is never consumed.
    #[inline]
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            trace!(kind = ?token.kind, pos = %token.pos, "advance");
            self.pos += 1;
        }
        token
    }

    /// Consume `kind` or fail with "expected X, found Y".
    #[inline]
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind.display_name()))
        }
    }

    /// Consume an identifier.
    #[inline]
    pub fn expect_ident(&mut self) -> Result<Ident, ParseError> {
        let token = self.current();
        if let TokenKind::Ident(name) = token.kind {
            self.advance();
            Ok(Ident {
                name,
                pos: token.pos,
            })
        } else {
            Err(self.make_expect_error("identifier"))
        }
    }

    #[cold]
    #[inline(never)]
    pub fn make_expect_error(&self, expected: &'static str) -> ParseError {
        self.error_here(ParseErrorKind::UnexpectedToken {
            expected,
            found: self.describe_current(),
        })
    }

    /// Error located at the current token.
    #[cold]
    pub fn error_here(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.current_span(), self.current_pos())
    }

    /// Skip blank `Newline` tokens.
    pub fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    /// Human-readable description of the current token, including its text
    /// for literals and identifiers.
    pub fn describe_current(&self) -> String {
        let kind = self.current_kind();
        match kind {
            TokenKind::Ident(name) => format!("identifier `{}`", self.interner.lookup(name)),
            TokenKind::Int(n) => format!("integer `{n}`"),
            TokenKind::Float(bits) => format!("float `{}`", f64::from_bits(bits)),
            TokenKind::Str(name) => format!("string {:?}", self.interner.lookup(name)),
            _ => kind.display_name().to_owned(),
        }
    }
}

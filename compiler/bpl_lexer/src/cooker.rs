//! Token cooking and layout.
//!
//! Turns the raw logos stream into parser-ready tokens:
//! - identifiers are classified through the keyword table, or interned
//! - numbers are decoded (Bengali digits included) and may absorb a sign
//! - strings are unescaped and interned
//! - line structure becomes `Newline`, `Indent` and `Dedent` tokens
//!
//! # Layout rules
//!
//! The indentation stack starts as `[0]`. At the first token of each logical
//! line the leading whitespace width is measured (tabs advance to the next
//! multiple of 4). A wider line pushes and emits one `Indent`; it is only
//! allowed directly after a line ending in `:`. A narrower line pops and
//! emits one `Dedent` per level until the width matches, and a width that
//! matches no level is an error. Blank and comment-only lines produce no
//! tokens. Inside parentheses newlines and indentation are ignored.

use std::ops::Range;

use bpl_ir::{Position, Span, StringInterner, Token, TokenKind, TokenList};
use logos::Logos;

use crate::bengali::{ascii_digits, compose};
use crate::escape::unescape;
use crate::lex_error::LexError;
use crate::raw_token::RawToken;
use crate::variants::KeywordTable;

/// Columns a tab advances indentation to a multiple of.
const TAB_WIDTH: u32 = 4;

type RawItem = (Result<RawToken, ()>, Range<usize>);

pub(crate) struct TokenCooker<'src> {
    source: &'src str,
    keywords: &'src KeywordTable,
    interner: &'src StringInterner,
    tokens: TokenList,
    /// Open indentation widths, innermost last. Never empty.
    indents: Vec<u32>,
    paren_depth: u32,
    /// 1-based number of the line being scanned.
    line: u32,
    /// Byte offset where the current line starts.
    line_start: usize,
    /// No token has been seen yet on the current logical line.
    at_line_start: bool,
    /// The previous logical line ended with `:`.
    opens_block: bool,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(
        source: &'src str,
        keywords: &'src KeywordTable,
        interner: &'src StringInterner,
    ) -> Self {
        TokenCooker {
            source,
            keywords,
            interner,
            tokens: TokenList::with_capacity(source.len() / 3 + 4),
            indents: vec![0],
            paren_depth: 0,
            line: 1,
            line_start: 0,
            at_line_start: true,
            opens_block: false,
        }
    }

    pub(crate) fn run(mut self) -> Result<TokenList, LexError> {
        let raw: Vec<RawItem> = RawToken::lexer(self.source).spanned().collect();

        let mut index = 0;
        while let Some((result, range)) = raw.get(index).cloned() {
            index += 1;
            let span = Span::from_range(range.clone());
            let pos = self.pos_at(range.start);

            let token = match result {
                Ok(token) => token,
                Err(()) => {
                    let c = self.source[range.start..].chars().next().unwrap_or('\u{FFFD}');
                    return Err(LexError::invalid_character(c, span, pos));
                }
            };

            match token {
                RawToken::Comment => {}
                RawToken::Newline => self.end_line(span, pos, range.end),
                _ => {
                    if self.at_line_start {
                        self.begin_line(span, pos)?;
                    }
                    let cooked = match self.fold_sign(token, &range, raw.get(index), span, pos)? {
                        Some(signed) => {
                            index += 1;
                            signed
                        }
                        None => self.cook(token, &range, span, pos)?,
                    };
                    self.track_parens(cooked.kind);
                    self.tokens.push(cooked);
                }
            }
        }

        self.finish();
        Ok(self.tokens)
    }

    /// Position of a byte offset on the current line.
    fn pos_at(&self, offset: usize) -> Position {
        let column = self.source[self.line_start..offset].chars().count() + 1;
        Position::new(self.line, u32::try_from(column).unwrap_or(u32::MAX))
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.as_slice().last().map(|t| t.kind)
    }

    fn push(&mut self, kind: TokenKind, span: Span, pos: Position) {
        self.tokens.push(Token::new(kind, span, pos));
    }

    fn track_parens(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::LParen => self.paren_depth += 1,
            TokenKind::RParen => self.paren_depth = self.paren_depth.saturating_sub(1),
            _ => {}
        }
    }

    /// Handle a `\n`: close the logical line if it had tokens.
    fn end_line(&mut self, span: Span, pos: Position, next_line_start: usize) {
        if self.paren_depth == 0 {
            if !self.at_line_start {
                self.opens_block = self.last_kind() == Some(TokenKind::Colon);
                self.push(TokenKind::Newline, span, pos);
            }
            self.at_line_start = true;
        }
        self.line += 1;
        self.line_start = next_line_start;
    }

    /// Apply indentation rules before the first token of a logical line.
    fn begin_line(&mut self, span: Span, pos: Position) -> Result<(), LexError> {
        self.at_line_start = false;
        let width = indent_width(&self.source[self.line_start..]);
        let top = self.indents.last().copied().unwrap_or(0);
        let at = Span::point(span.start);

        if width > top {
            if !self.opens_block {
                let indentation = Span::from_range(self.line_start..span.start as usize);
                return Err(LexError::unexpected_indent(indentation, pos));
            }
            self.indents.push(width);
            self.push(TokenKind::Indent, at, pos);
        } else if width < top {
            while self.indents.last().is_some_and(|&level| width < level) {
                self.indents.pop();
                self.push(TokenKind::Dedent, at, pos);
            }
            if self.indents.last() != Some(&width) {
                return Err(LexError::inconsistent_dedent(width, span, pos));
            }
        }
        self.opens_block = false;
        Ok(())
    }

    /// Close any open line and blocks, then append `Eof`.
    fn finish(&mut self) {
        let end = self.source.len();
        let span = Span::from_range(end..end);
        let pos = self.pos_at(end);
        if !self.at_line_start {
            self.push(TokenKind::Newline, span, pos);
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.push(TokenKind::Dedent, span, pos);
        }
        self.push(TokenKind::Eof, span, pos);
    }

    /// Convert one raw token.
    fn cook(
        &self,
        token: RawToken,
        range: &Range<usize>,
        span: Span,
        pos: Position,
    ) -> Result<Token, LexError> {
        let slice = &self.source[range.clone()];
        let kind = match token {
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Eq => TokenKind::Eq,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Int | RawToken::Float => number(token, "", slice, span, pos)?,
            RawToken::MalformedNumber => return Err(LexError::malformed_number(span, pos)),
            RawToken::Str => {
                let body = &slice[1..slice.len() - 1];
                TokenKind::Str(self.interner.intern(&unescape(body)))
            }
            RawToken::UnterminatedStr => {
                let quote = slice.chars().next().unwrap_or('"');
                return Err(LexError::unterminated_string(quote, span, pos));
            }
            RawToken::Ident => match self.keywords.lookup(slice) {
                Some(keyword) => keyword.token_kind(),
                None => TokenKind::Ident(self.interner.intern(&compose(slice))),
            },
            RawToken::Comment | RawToken::Newline => TokenKind::Newline,
        };
        Ok(Token::new(kind, span, pos))
    }

    /// Fold a `+`/`-` into the number directly after it, when the sign cannot
    /// be a binary operator.
    fn fold_sign(
        &self,
        token: RawToken,
        range: &Range<usize>,
        next: Option<&RawItem>,
        span: Span,
        pos: Position,
    ) -> Result<Option<Token>, LexError> {
        let sign = match token {
            RawToken::Plus => "+",
            RawToken::Minus => "-",
            _ => return Ok(None),
        };
        if self.last_kind().is_some_and(TokenKind::ends_operand) {
            return Ok(None);
        }
        let Some((Ok(number_token @ (RawToken::Int | RawToken::Float)), next_range)) = next else {
            return Ok(None);
        };
        if next_range.start != range.end {
            return Ok(None);
        }
        let span = span.merge(Span::from_range(next_range.clone()));
        let kind = number(
            *number_token,
            sign,
            &self.source[next_range.clone()],
            span,
            pos,
        )?;
        Ok(Some(Token::new(kind, span, pos)))
    }
}

/// Decode a numeric literal with an optional sign prefix.
fn number(
    token: RawToken,
    sign: &str,
    digits: &str,
    span: Span,
    pos: Position,
) -> Result<TokenKind, LexError> {
    let text = format!("{sign}{}", ascii_digits(digits));
    if token == RawToken::Float {
        text.parse::<f64>()
            .map(TokenKind::float)
            .map_err(|_| LexError::malformed_number(span, pos))
    } else {
        text.parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| LexError::integer_overflow(span, pos))
    }
}

/// Indentation width of a line: spaces count 1, tabs advance to the next stop.
fn indent_width(line: &str) -> u32 {
    let mut width = 0;
    for c in line.chars() {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
            _ => break,
        }
    }
    width
}

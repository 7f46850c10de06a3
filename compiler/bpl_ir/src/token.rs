//! Token types produced by the lexer.

use super::{Name, Position, Span};
use std::fmt;
use std::ops::Index;

/// A token with its byte span and 1-based start position.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span, pos: Position) -> Self {
        Token { kind, span, pos }
    }

    /// Token with a dummy span at the start of the source, for tests.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
            pos: Position::START,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.pos)
    }
}

/// Token kinds.
///
/// Keywords are classified after variant normalization, so every surface
/// spelling of a keyword produces the same kind. Float literals store their
/// bits so the enum stays `Eq + Hash`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Integer literal, sign already folded in when the lexer saw one.
    Int(i64),
    /// Float literal as `f64::to_bits`.
    Float(u64),
    /// String literal contents after escape processing (interned).
    Str(Name),
    /// Identifier, in canonical composed form (interned).
    Ident(Name),

    // Keywords
    If,
    Else,
    While,
    Function,
    Return,
    True,
    False,
    Nil,
    /// The print builtin's name is reserved, so its variants resolve too.
    Print,
    And,
    Or,
    Not,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,

    // Delimiters
    LParen,
    RParen,
    Colon,
    Comma,

    // Layout
    Newline,
    Indent,
    Dedent,
    Eof,
}

impl TokenKind {
    /// Float literal token from a value.
    #[inline]
    pub fn float(value: f64) -> Self {
        TokenKind::Float(value.to_bits())
    }

    /// True for keyword kinds.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::Function
                | TokenKind::Return
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
                | TokenKind::Print
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
        )
    }

    /// True if an expression can end with this token.
    ///
    /// A `+`/`-` directly after such a token is a binary operator; anywhere
    /// else it may be folded into a following numeric literal.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Str(_)
                | TokenKind::Ident(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
                | TokenKind::Print
                | TokenKind::RParen
        )
    }

    /// Short description used in "expected X, found Y" messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Str(_) => "string",
            TokenKind::Ident(_) => "identifier",
            TokenKind::If => "`যদি`",
            TokenKind::Else => "`নইলে`",
            TokenKind::While => "`যখন`",
            TokenKind::Function => "`ফাংশন`",
            TokenKind::Return => "`ফলাফল`",
            TokenKind::True => "`সত্য`",
            TokenKind::False => "`মিথ্যা`",
            TokenKind::Nil => "`নিল`",
            TokenKind::Print => "`দেখাও`",
            TokenKind::And => "`এবং`",
            TokenKind::Or => "`বা`",
            TokenKind::Not => "`না`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::Eq => "`=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::Newline => "newline",
            TokenKind::Indent => "indent",
            TokenKind::Dedent => "dedent",
            TokenKind::Eof => "end of input",
        }
    }
}

/// Lexer output: a token sequence that always ends with `Eof`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn from_vec(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Token kinds in order, for tests and the `lex` command.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

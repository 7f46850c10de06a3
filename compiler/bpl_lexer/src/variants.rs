//! Keyword variant normalization.
//!
//! Users type keywords through different Bengali keyboard layouts and
//! spellings; all of them must classify as the same keyword. The table maps
//! every accepted surface form to a [`Keyword`], and [`KeywordTable::normalize`]
//! maps a lexeme to its keyword's canonical spelling (or returns it unchanged).
//!
//! Matching is one hash lookup of the lexeme's composed form against the
//! composed surface forms, so differently-encoded vowel signs still match.
//! Anything else, including words that merely share consonants with a
//! keyword, stays an identifier. Every keyboard-layout spelling that should
//! be accepted is listed in [`VARIANTS`].
//!
//! The process-wide table is built once by [`KeywordTable::builtin`] and is
//! read-only afterwards.

use std::fmt;
use std::sync::OnceLock;

use bpl_diagnostic::{Diagnostic, ErrorCode};
use bpl_ir::TokenKind;
use rustc_hash::FxHashMap;

use crate::bengali::compose;

/// A language keyword, independent of how it was spelled.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Keyword {
    If,
    Else,
    While,
    Function,
    Return,
    True,
    False,
    Nil,
    Print,
    And,
    Or,
    Not,
}

impl Keyword {
    pub const ALL: [Keyword; 12] = [
        Keyword::If,
        Keyword::Else,
        Keyword::While,
        Keyword::Function,
        Keyword::Return,
        Keyword::True,
        Keyword::False,
        Keyword::Nil,
        Keyword::Print,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
    ];

    /// The one spelling the rest of the pipeline sees.
    pub const fn canonical(self) -> &'static str {
        match self {
            Keyword::If => "যদি",
            Keyword::Else => "নইলে",
            Keyword::While => "যখন",
            Keyword::Function => "ফাংশন",
            Keyword::Return => "ফলাফল",
            Keyword::True => "সত্য",
            Keyword::False => "মিথ্যা",
            Keyword::Nil => "নিল",
            Keyword::Print => "দেখাও",
            Keyword::And => "এবং",
            Keyword::Or => "বা",
            Keyword::Not => "না",
        }
    }

    pub const fn token_kind(self) -> TokenKind {
        match self {
            Keyword::If => TokenKind::If,
            Keyword::Else => TokenKind::Else,
            Keyword::While => TokenKind::While,
            Keyword::Function => TokenKind::Function,
            Keyword::Return => TokenKind::Return,
            Keyword::True => TokenKind::True,
            Keyword::False => TokenKind::False,
            Keyword::Nil => TokenKind::Nil,
            Keyword::Print => TokenKind::Print,
            Keyword::And => TokenKind::And,
            Keyword::Or => TokenKind::Or,
            Keyword::Not => TokenKind::Not,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// Accepted alternate spellings. Canonical spellings are always added.
///
/// Format: `(surface_form, keyword)`
pub const VARIANTS: &[(&str, Keyword)] = &[
    ("অন্যথায়", Keyword::Else),
    ("নইতো", Keyword::Else),
    ("যতক্ষণ", Keyword::While),
    ("ফংশন", Keyword::Function),
    ("ফাংশণ", Keyword::Function),
    ("ফেরত", Keyword::Return),
    ("রিটার্ন", Keyword::Return),
    ("সঁচা", Keyword::True),
    ("ঠিক", Keyword::True),
    ("মিথা", Keyword::False),
    ("ভুল", Keyword::False),
    ("শূন্য", Keyword::Nil),
    ("কোনো", Keyword::Nil),
    ("মুদ্রণ", Keyword::Print),
    ("প্রিন্ট", Keyword::Print),
    ("ছাপো", Keyword::Print),
    ("এবাং", Keyword::And),
    ("ও", Keyword::And),
    ("অথবা", Keyword::Or),
    ("অথবো", Keyword::Or),
    ("নয়", Keyword::Not),
];

/// The variant table maps one spelling to two keywords.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    AmbiguousVariant {
        surface: String,
        first: Keyword,
        second: Keyword,
    },
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::AmbiguousVariant { .. } => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_suggestion("remove one of the conflicting entries from the keyword table")
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::AmbiguousVariant {
                surface,
                first,
                second,
            } => write!(
                f,
                "keyword variant `{surface}` maps to both `{first}` and `{second}`"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Surface form to keyword mapping.
#[derive(Debug, Default)]
pub struct KeywordTable {
    by_surface: FxHashMap<Box<str>, Keyword>,
}

static BUILTIN: OnceLock<Result<KeywordTable, ConfigError>> = OnceLock::new();

impl KeywordTable {
    /// The process-wide table built from [`VARIANTS`].
    pub fn builtin() -> Result<&'static KeywordTable, ConfigError> {
        BUILTIN
            .get_or_init(|| KeywordTable::from_entries(VARIANTS.iter().copied()))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Build a table from `(surface, keyword)` entries plus every canonical
    /// spelling.
    ///
    /// Fails if two entries for different keywords share a composed form.
    /// Repeating an entry for the same keyword is allowed.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, Keyword)>,
    ) -> Result<Self, ConfigError> {
        let mut table = KeywordTable::default();
        let canonical = Keyword::ALL.iter().map(|&kw| (kw.canonical(), kw));
        for (surface, keyword) in canonical.chain(entries) {
            table.insert(surface, keyword)?;
        }
        tracing::debug!(entries = table.by_surface.len(), "built keyword table");
        Ok(table)
    }

    fn insert(&mut self, surface: &str, keyword: Keyword) -> Result<(), ConfigError> {
        let key: Box<str> = compose(surface).into();
        match self.by_surface.get(&key) {
            Some(&existing) if existing != keyword => Err(ConfigError::AmbiguousVariant {
                surface: surface.to_owned(),
                first: existing,
                second: keyword,
            }),
            Some(_) => Ok(()),
            None => {
                self.by_surface.insert(key, keyword);
                Ok(())
            }
        }
    }

    /// Keyword spelled by `raw`, if any.
    pub fn lookup(&self, raw: &str) -> Option<Keyword> {
        self.by_surface.get(compose(raw).as_ref()).copied()
    }

    /// Canonical spelling of the keyword `raw` spells, or `raw` unchanged.
    ///
    /// Idempotent: `normalize(normalize(x)) == normalize(x)`.
    pub fn normalize<'a>(&self, raw: &'a str) -> &'a str {
        match self.lookup(raw) {
            Some(keyword) => keyword.canonical(),
            None => raw,
        }
    }

    /// Number of distinct composed surface forms.
    pub fn len(&self) -> usize {
        self.by_surface.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_surface.is_empty()
    }
}

//! Lexer for BPL.
//!
//! ```text
//! source → logos RawToken → TokenCooker (keywords, literals, layout) → TokenList
//! ```
//!
//! Keywords may be typed in several spellings; [`variants`] resolves them to
//! one canonical keyword before classification. The token list always ends
//! with the `Dedent`s closing every open block followed by `Eof`.

mod bengali;
mod cooker;
mod escape;
mod lex_error;
mod raw_token;
pub mod variants;

use bpl_ir::{StringInterner, TokenList};

pub use bengali::compose;
pub use lex_error::{LexError, LexErrorKind};
pub use variants::{ConfigError, Keyword, KeywordTable};

/// Lex source text into a `TokenList`.
///
/// Stops at the first malformed character sequence or indentation error.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn lex(
    source: &str,
    keywords: &KeywordTable,
    interner: &StringInterner,
) -> Result<TokenList, LexError> {
    let tokens = cooker::TokenCooker::new(source, keywords, interner).run()?;
    tracing::debug!(tokens = tokens.len(), "lexed source");
    Ok(tokens)
}

//! Bengali text normalization used by keyword matching.
//!
//! [`compose`] brings a lexeme to the composed form Unicode NFC gives for the
//! Bengali block: two-part vowel signs are composed, nukta letters are kept
//! decomposed (they are composition exclusions). Keyboard layouts that emit
//! `ে` + `া` instead of `ো` therefore produce the same keyword or identifier.

use std::borrow::Cow;

/// Two-part vowel signs and nukta letters with their canonical decompositions.
///
/// Format: `(precomposed, base, mark)`
const DECOMPOSITIONS: &[(char, char, char)] = &[
    ('\u{09CB}', '\u{09C7}', '\u{09BE}'), // ো = ে + া
    ('\u{09CC}', '\u{09C7}', '\u{09D7}'), // ৌ = ে + ৗ
    ('\u{09DC}', '\u{09A1}', '\u{09BC}'), // ড় = ড + ়
    ('\u{09DD}', '\u{09A2}', '\u{09BC}'), // ঢ় = ঢ + ়
    ('\u{09DF}', '\u{09AF}', '\u{09BC}'), // য় = য + ়
];

/// Decomposed pairs NFC recomposes. The nukta letters are excluded.
const COMPOSITIONS: &[(char, char, char)] = &[
    ('\u{09C7}', '\u{09BE}', '\u{09CB}'),
    ('\u{09C7}', '\u{09D7}', '\u{09CC}'),
];

fn decomposition(c: char) -> Option<(char, char)> {
    DECOMPOSITIONS
        .iter()
        .find(|&&(composed, _, _)| composed == c)
        .map(|&(_, base, mark)| (base, mark))
}

fn composition(first: char, second: char) -> Option<char> {
    COMPOSITIONS
        .iter()
        .find(|&&(a, b, _)| a == first && b == second)
        .map(|&(_, _, composed)| composed)
}

/// Canonical composed form of `text`. Borrows when nothing changes.
pub fn compose(text: &str) -> Cow<'_, str> {
    let has_pair = text
        .chars()
        .zip(text.chars().skip(1))
        .any(|(a, b)| composition(a, b).is_some());
    let has_nukta_letter = text
        .chars()
        .any(|c| matches!(c, '\u{09DC}' | '\u{09DD}' | '\u{09DF}'));
    if !has_pair && !has_nukta_letter {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut pending: Option<char> = None;
    for c in text.chars() {
        let c = match c {
            '\u{09DC}' | '\u{09DD}' | '\u{09DF}' => {
                if let Some((base, nukta)) = decomposition(c) {
                    if let Some(p) = pending.take() {
                        out.push(p);
                    }
                    out.push(base);
                    nukta
                } else {
                    c
                }
            }
            _ => c,
        };
        match pending.take() {
            Some(p) => match composition(p, c) {
                Some(composed) => out.push(composed),
                None => {
                    out.push(p);
                    pending = Some(c);
                }
            },
            None => pending = Some(c),
        }
    }
    if let Some(p) = pending {
        out.push(p);
    }
    Cow::Owned(out)
}

/// Value of an ASCII or Bengali decimal digit.
pub(crate) fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(u32::from(c) - u32::from('0')),
        '\u{09E6}'..='\u{09EF}' => Some(u32::from(c) - 0x09E6),
        _ => None,
    }
}

/// Rewrite a digit string to ASCII so `str::parse` can read it.
pub(crate) fn ascii_digits(text: &str) -> String {
    text.chars()
        .map(|c| match digit_value(c).and_then(|d| char::from_digit(d, 10)) {
            Some(ascii) => ascii,
            None => c,
        })
        .collect()
}

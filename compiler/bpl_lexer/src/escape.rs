//! String literal escape processing.

/// Decode the body of a string literal (quotes already stripped).
///
/// Recognized escapes are `\n`, `\t`, `\\`, `\"` and `\'`; any other escaped
/// character stands for itself.
pub(crate) fn unescape(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn known_escapes() {
        assert_eq!(unescape(r"a\nb\tc"), "a\nb\tc");
        assert_eq!(unescape(r#"\"quoted\""#), "\"quoted\"");
        assert_eq!(unescape(r"it\'s"), "it's");
        assert_eq!(unescape(r"back\\slash"), "back\\slash");
    }

    #[test]
    fn unknown_escape_keeps_character() {
        assert_eq!(unescape(r"\q\৫"), "q৫");
    }

    #[test]
    fn bengali_text_is_untouched() {
        assert_eq!(unescape("নমস্কার"), "নমস্কার");
    }
}

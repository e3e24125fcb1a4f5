//! RediSearch escaping
//!
//! TAG values in a query must have every character RediSearch treats as
//! punctuation backslash-escaped, or a value like `foo,bar` would be read
//! as two tags. TEXT terms are deliberately not escaped this way —
//! punctuation there is tokenized away and stemming applies.

/// Characters RediSearch gives special meaning inside a query
const SPECIAL: &str = ",.<>{}[]\"':;!@#$%^&*()-+=~|/ ";

/// Backslash-escape a value for use inside `@field:{...}`
pub fn escape_tag(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if SPECIAL.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_untouched() {
        assert_eq!(escape_tag("alfa"), "alfa");
        assert_eq!(escape_tag("alfa_bravo42"), "alfa_bravo42");
    }

    #[test]
    fn test_every_special_character_is_escaped() {
        for c in SPECIAL.chars() {
            let escaped = escape_tag(&c.to_string());
            assert_eq!(escaped, format!("\\{c}"), "char {c:?}");
        }
    }

    #[test]
    fn test_mixed_value() {
        assert_eq!(escape_tag("foo,bar"), "foo\\,bar");
        assert_eq!(escape_tag("a b|c"), "a\\ b\\|c");
        assert_eq!(escape_tag("x@y.z"), "x\\@y\\.z");
    }
}

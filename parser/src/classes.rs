//! Built-in character sets behind `\d`, `\w` and `\s`.

use rexgen_grammar::CharSet;

/// `\d`: the ASCII digits.
pub(crate) fn digit_chars() -> CharSet {
    CharSet::range('0', '9')
}

/// `\w`: ASCII alphanumerics and underscore.
pub(crate) fn word_chars() -> CharSet {
    let mut set = CharSet::range('a', 'z');
    set.extend('A'..='Z');
    set.extend('0'..='9');
    set.extend(['_']);
    set
}

/// `\s`: the ECMAScript WhiteSpace and LineTerminator characters.
pub(crate) fn whitespace_chars() -> CharSet {
    let mut set = CharSet::new([
        '\t', '\n', '\u{000B}', '\u{000C}', '\r', ' ', '\u{00A0}', '\u{1680}', '\u{2028}',
        '\u{2029}', '\u{202F}', '\u{205F}', '\u{3000}', '\u{FEFF}',
    ]);
    set.extend('\u{2000}'..='\u{200A}');
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_chars() {
        let set = digit_chars();
        assert_eq!(set.len(), 10);
        assert!(set.contains('0'));
        assert!(set.contains('9'));
        assert!(!set.contains('a'));
    }

    #[test]
    fn test_word_chars() {
        let set = word_chars();
        assert_eq!(set.len(), 63);
        assert!(set.contains('_'));
        assert!(set.contains('Z'));
        assert!(!set.contains('-'));
    }

    #[test]
    fn test_whitespace_chars() {
        let set = whitespace_chars();
        assert!(set.contains(' '));
        assert!(set.contains('\t'));
        assert!(set.contains('\u{2003}'));
        assert!(!set.contains('a'));
    }
}

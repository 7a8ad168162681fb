//! Generation options: the character universe behind `.` and negated
//! classes.

/// Configuration for generation.
///
/// Holds the ordered set of "any printable character" code points the
/// generator may draw from when a pattern says `.` or `[^…]`. The set is
/// read-only once built and can be shared freely across callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenOptions {
    printable: Vec<char>,
}

impl Default for GenOptions {
    /// Printable ASCII, U+0020 through U+007E.
    fn default() -> Self {
        Self {
            printable: (0x20u8..=0x7e).map(char::from).collect(),
        }
    }
}

impl GenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the printable universe. The characters are stored sorted and
    /// deduplicated; "first N in universe order" therefore means lowest code
    /// points first.
    pub fn with_printable(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        let mut printable: Vec<char> = chars.into_iter().collect();
        printable.sort_unstable();
        printable.dedup();
        self.printable = printable;
        self
    }

    /// The universe in its canonical order.
    pub fn printable(&self) -> &[char] {
        &self.printable
    }

    pub fn contains(&self, c: char) -> bool {
        self.printable.binary_search(&c).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_printable_ascii() {
        let opts = GenOptions::default();
        assert_eq!(opts.printable().len(), 95);
        assert_eq!(opts.printable().first(), Some(&' '));
        assert_eq!(opts.printable().last(), Some(&'~'));
        assert!(opts.contains('a'));
        assert!(!opts.contains('\n'));
    }

    #[test]
    fn test_with_printable_sorts_and_dedups() {
        let opts = GenOptions::new().with_printable(['c', 'a', 'b', 'a']);
        assert_eq!(opts.printable(), &['a', 'b', 'c']);
        assert!(opts.contains('b'));
        assert!(!opts.contains('d'));
    }
}

//! Character sets backing the class nodes of the grammar tree.

use std::fmt;

/// A finite set of characters, stored sorted and deduplicated.
///
/// Class nodes keep their member characters in a `CharSet`. Lookup is a
/// binary search, and characters can be addressed by index so a generator
/// can draw one uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
}

impl CharSet {
    /// Builds a set from any character source, sorting and deduplicating.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        CharSet { chars }
    }

    /// The empty set.
    pub fn empty() -> Self {
        CharSet { chars: Vec::new() }
    }

    /// Builds a set from an inclusive character range.
    pub fn range(lo: char, hi: char) -> Self {
        CharSet::new(lo..=hi)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.binary_search(&c).is_ok()
    }

    /// The character at `index` in sorted order.
    ///
    /// # Panics
    /// Panics when `index >= len()`.
    pub fn get(&self, index: usize) -> char {
        self.chars[index]
    }

    /// Iterates the characters in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// The characters as a sorted slice.
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Merges another set into this one.
    pub fn extend(&mut self, other: impl IntoIterator<Item = char>) {
        self.chars.extend(other);
        self.chars.sort_unstable();
        self.chars.dedup();
    }

    /// The characters present in both sets.
    pub fn intersection(&self, other: &CharSet) -> CharSet {
        CharSet {
            chars: self.iter().filter(|&c| other.contains(c)).collect(),
        }
    }

    /// The characters of this set that are not in `other`.
    pub fn difference(&self, other: &CharSet) -> CharSet {
        CharSet {
            chars: self.iter().filter(|&c| !other.contains(c)).collect(),
        }
    }

    /// The members of `universe` that are not in this set.
    pub fn complement_within(&self, universe: &[char]) -> Vec<char> {
        universe
            .iter()
            .copied()
            .filter(|&c| !self.contains(c))
            .collect()
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        CharSet::new(iter)
    }
}

impl IntoIterator for CharSet {
    type Item = char;
    type IntoIter = std::vec::IntoIter<char>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars.into_iter()
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

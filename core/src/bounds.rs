//! Inclusive integer ranges and the arithmetic used to split a length
//! budget across sub-expressions.

use std::fmt;

/// An inclusive range `[min, max]` over non-negative counts.
///
/// `max = None` means the range is unbounded above. Values are immutable;
/// every combinator returns a new `Bounds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: usize,
    max: Option<usize>,
}

impl Bounds {
    /// A bounded range `[min, max]`.
    ///
    /// Panics if `max < min`; bounds are always produced from validated
    /// input, so a reversed range is a caller bug.
    pub fn new(min: usize, max: usize) -> Self {
        assert!(max >= min, "reversed bounds: [{}, {}]", min, max);
        Self {
            min,
            max: Some(max),
        }
    }

    /// The range `[min, ∞)`.
    pub fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// A range from explicit parts; `max = None` is unbounded.
    ///
    /// Panics if `max` is present and below `min`.
    pub fn from_parts(min: usize, max: Option<usize>) -> Self {
        match max {
            Some(max) => Self::new(min, max),
            None => Self::at_least(min),
        }
    }

    /// The degenerate range `[n, n]`.
    pub fn exactly(n: usize) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    /// The default occurrence count of an unquantified node: `[1, 1]`.
    pub fn once() -> Self {
        Self::exactly(1)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }

    /// True if `n` lies within the range.
    pub fn contains(&self, n: usize) -> bool {
        n >= self.min && self.max.map_or(true, |max| n <= max)
    }

    /// Element-wise addition; an unbounded side absorbs the sum. Bounded
    /// sides saturate at `usize::MAX`.
    pub fn sum(&self, other: Bounds) -> Bounds {
        Bounds {
            min: self.min.saturating_add(other.min),
            max: match (self.max, other.max) {
                (Some(a), Some(b)) => Some(a.saturating_add(b)),
                _ => None,
            },
        }
    }

    /// Element-wise multiplication, used to scale a per-occurrence length
    /// range by an occurrence count. `0 × unbounded = 0`: a node whose every
    /// occurrence is empty stays empty no matter how often it repeats.
    /// Bounded sides saturate at `usize::MAX`.
    pub fn product(&self, other: Bounds) -> Bounds {
        Bounds {
            min: self.min.saturating_mul(other.min),
            max: match (self.max, other.max) {
                (Some(a), Some(b)) => Some(a.saturating_mul(b)),
                (Some(0), None) | (None, Some(0)) => Some(0),
                _ => None,
            },
        }
    }

    /// The occurrence window implied by covering this length range with
    /// pieces whose individual length lies in `per`: how few / how many
    /// pieces can tile a total within `self`.
    ///
    /// Returns `None` when no piece count works (for example a positive
    /// minimum with zero-length pieces, or a total that no whole number of
    /// pieces can reach).
    pub fn divided_by(&self, per: Bounds) -> Option<Bounds> {
        let min = if self.min == 0 {
            0
        } else {
            match per.max {
                // One arbitrarily long piece covers any minimum.
                None => 1,
                // Zero-length pieces can never reach a positive minimum.
                Some(0) => return None,
                Some(per_max) => self.min.div_ceil(per_max),
            }
        };
        let max = if per.min == 0 {
            None
        } else {
            match self.max {
                None => None,
                Some(total) => Some(total / per.min),
            }
        };
        match max {
            Some(max) if max < min => None,
            _ => Some(Bounds { min, max }),
        }
    }

    /// The overlap of two ranges, or `None` when they are disjoint.
    pub fn intersect(&self, other: Bounds) -> Option<Bounds> {
        let min = self.min.max(other.min);
        let max = match (self.max, other.max) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) | (None, Some(a)) => Some(a),
            (None, None) => None,
        };
        match max {
            Some(max) if max < min => None,
            _ => Some(Bounds { min, max }),
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{{{}}}", self.min),
            Some(max) => write!(f, "{{{},{}}}", self.min, max),
            None => write!(f, "{{{},}}", self.min),
        }
    }
}

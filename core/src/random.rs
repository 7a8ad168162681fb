//! Randomness abstraction for the generator.
//!
//! Generation code never talks to a concrete RNG type; it draws through
//! [`RandomSource`], which any [`rand::Rng`] satisfies via the blanket impl.
//! Deterministic tests plug in `StdRng::seed_from_u64`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::Bounds;

/// Spread applied when drawing from a range with no upper bound: the draw is
/// taken uniformly from `[min, min + UNBOUNDED_DRAW_SPREAD]`.
pub const UNBOUNDED_DRAW_SPREAD: usize = 100;

/// The three draws the generation algorithm needs.
pub trait RandomSource {
    /// A uniform integer in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize;

    /// A uniform integer within `bounds`. An unbounded maximum is capped at
    /// `min + UNBOUNDED_DRAW_SPREAD` so that `*`-style repetition always
    /// terminates.
    fn within(&mut self, bounds: Bounds) -> usize;

    /// Shuffle a slice in place.
    fn shuffle<T>(&mut self, items: &mut [T]);
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }

    fn within(&mut self, bounds: Bounds) -> usize {
        let lo = bounds.min();
        let hi = bounds
            .max()
            .unwrap_or_else(|| lo.saturating_add(UNBOUNDED_DRAW_SPREAD));
        self.gen_range(lo..=hi)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(self)
    }
}

//! A prepared generator: one parsed tree plus its options.

use rexgen_core::{Bounds, GenOptions, RandomSource};
use rexgen_grammar::{GenerateResult, GrammarNode};

/// A reusable string generator for one pattern.
///
/// All state is fixed at construction; generation only reads it, so a
/// `Generator` can be cloned cheaply and shared across threads as long as
/// each caller brings its own random source.
#[derive(Debug, Clone)]
pub struct Generator {
    pattern: String,
    node: GrammarNode,
    options: GenOptions,
}

impl Generator {
    pub(crate) fn new(pattern: &str, node: GrammarNode, options: GenOptions) -> Self {
        Self {
            pattern: pattern.to_string(),
            node,
            options,
        }
    }

    /// Generates one string whose length lies within `bounds`.
    pub fn generate<R: RandomSource>(&self, rng: &mut R, bounds: Bounds) -> GenerateResult<String> {
        self.node.generate(&self.options, rng, bounds)
    }

    /// The lengths this generator can produce.
    pub fn length_bounds(&self) -> Bounds {
        self.node.length_bounds()
    }

    /// Whether a length request can be satisfied; call before `generate`
    /// when the request comes from outside.
    pub fn is_feasible_length(&self, bounds: Bounds) -> bool {
        self.node.is_feasible_length(bounds)
    }

    /// The pattern this generator was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

//! Errors raised while generating a string from a grammar tree.

use rexgen_core::Bounds;
use thiserror::Error;

/// Failure modes of [`GrammarNode::generate`](crate::GrammarNode::generate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The requested length window does not intersect the lengths the tree
    /// can produce.
    #[error("no string of length {requested} exists: producible lengths are {feasible}")]
    InfeasibleLength { requested: Bounds, feasible: Bounds },

    /// A character class resolved to zero characters but at least one
    /// character had to be drawn from it.
    #[error("character class `{class}` has no characters to draw from")]
    EmptyClass { class: String },

    /// A sequence member could not be fitted into the remaining length
    /// budget, even after relaxing its share down to its own minimum.
    #[error("could not fit `{node}` into the remaining length budget")]
    DeadEnd { node: String },
}

pub type GenerateResult<T> = Result<T, GenerateError>;

//! Grammar tree for random string generation.
//!
//! A parsed pattern becomes a tree of [`GrammarNode`]s. Every node knows how
//! many times it occurs, which character shapes it can take, and whether it is
//! anchored to the start or end of the generated string. The tree can report
//! the lengths it is able to produce ([`GrammarNode::length_bounds`]) and can
//! generate a random string inside a caller-supplied length window
//! ([`GrammarNode::generate`]).

mod charset;
mod error;
mod generate;
mod node;

pub use charset::*;
pub use error::*;
pub use node::*;

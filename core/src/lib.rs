//! rexgen core types
//!
//! This crate provides the foundational types shared by the rexgen engine:
//! - Bounds (inclusive integer ranges with budget arithmetic)
//! - RandomSource (the randomness abstraction the generator draws from)
//! - GenOptions (the printable character universe)

mod bounds;
mod options;
mod random;

pub use bounds::*;
pub use options::*;
pub use random::*;

//! The rexgen facade.
//!
//! A [`Provider`] turns patterns into [`Generator`]s three ways:
//!
//! - [`Provider::matching`]: strings the pattern would match anywhere,
//!   as if searched for in a larger document;
//! - [`Provider::matching_exact`]: strings the pattern matches in full;
//! - [`Provider::not_matching`]: strings guaranteed *not* to match, or
//!   `None` when the pattern is too permissive for that promise.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use rexgen_provider::{Bounds, Provider};
//!
//! let provider = Provider::new();
//! let generator = provider.matching_exact("[0-9]{2,4}").unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//! let s = generator.generate(&mut rng, Bounds::new(0, 10)).unwrap();
//! assert!(s.len() >= 2 && s.len() <= 4);
//! ```

mod generator;
mod provider;

pub use generator::*;
pub use provider::*;

pub use rexgen_core::{Bounds, GenOptions, RandomSource, UNBOUNDED_DRAW_SPREAD};
pub use rexgen_grammar::GenerateError;
pub use rexgen_parser::SyntaxError;

//! Complement construction: a grammar tree whose every output fails to
//! match the pattern it was built from.
//!
//! The builder reasons about the *first* character a match would need.
//! Starting a string with a character no match can start with, or cutting
//! it shorter than any match can be, guarantees a mismatch without
//! simulating the full pattern. When neither lever exists (for example
//! `.*`, which accepts everything) the complement is reported as infeasible
//! by returning `None`.

mod builder;
mod chain;

pub use builder::*;

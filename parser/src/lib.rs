//! Recursive-descent parser for an ECMAScript-style regular expression
//! subset.
//!
//! [`parse`] turns a pattern into a `rexgen-grammar` tree. The accepted
//! subset covers literals, `.`, character classes with ranges and negation,
//! the named classes `\d \D \w \W \s \S`, groups (plain, non-capturing and
//! named), alternation, anchors and the usual quantifiers. Constructs a
//! generator cannot honor (back-references, word boundaries, negative
//! look-around) are rejected with a [`SyntaxError`] instead of being
//! silently approximated.

mod classes;
mod error;
mod parse;

pub use error::*;
pub use parse::*;

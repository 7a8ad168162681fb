//! The provider: pattern in, generator out.

use rexgen_core::GenOptions;
use rexgen_parser::{parse, ParseResult};

use crate::Generator;

/// Stateless entry point holding only the generation options.
///
/// Parsing happens once per call; the returned [`Generator`] owns its tree
/// and can be cloned and shared freely afterwards.
#[derive(Debug, Clone, Default)]
pub struct Provider {
    options: GenOptions,
}

impl Provider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: GenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenOptions {
        &self.options
    }

    /// A generator for strings containing a match of `pattern`, the way an
    /// unanchored regex search would find one.
    pub fn matching(&self, pattern: &str) -> ParseResult<Generator> {
        let node = parse(pattern, false)?;
        Ok(Generator::new(pattern, node, self.options.clone()))
    }

    /// A generator for strings `pattern` matches in full.
    pub fn matching_exact(&self, pattern: &str) -> ParseResult<Generator> {
        let node = parse(pattern, true)?;
        Ok(Generator::new(pattern, node, self.options.clone()))
    }

    /// A generator for strings guaranteed not to match `pattern`, or `None`
    /// when the pattern leaves no string to generate (`.*` matches
    /// everything, and a pattern with an optional empty branch cannot be
    /// safely complemented).
    pub fn not_matching(&self, pattern: &str) -> ParseResult<Option<Generator>> {
        let node = parse(pattern, true)?;
        Ok(rexgen_complement::not_matching(&node, &self.options)
            .map(|tree| Generator::new(pattern, tree, self.options.clone())))
    }
}

//! The grammar tree a pattern parses into.

use std::fmt;

use rexgen_core::Bounds;

use crate::CharSet;

/// The shape of one grammar node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// One character drawn from a fixed set.
    AnyOf(CharSet),
    /// One character drawn from the configured universe minus a fixed set.
    NoneOf(CharSet),
    /// One character drawn from the whole configured universe.
    AnyPrintable,
    /// Members generated one after another, in order.
    Sequence(Vec<GrammarNode>),
    /// Exactly one member generated per occurrence.
    Alternative(Vec<GrammarNode>),
}

/// One node of a parsed pattern.
///
/// A node pairs a [`NodeKind`] with the number of times it occurs, optional
/// start/end anchors, and the slice of pattern text it was parsed from. Nodes
/// are immutable once built; the `with_*` builders are used only while a tree
/// is being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarNode {
    kind: NodeKind,
    occurs: Bounds,
    anchor_start: bool,
    anchor_end: bool,
    source: String,
}

impl GrammarNode {
    fn from_kind(kind: NodeKind) -> Self {
        GrammarNode {
            kind,
            occurs: Bounds::once(),
            anchor_start: false,
            anchor_end: false,
            source: String::new(),
        }
    }

    /// A node matching one character from `chars`.
    pub fn any_of(chars: impl IntoIterator<Item = char>) -> Self {
        Self::from_kind(NodeKind::AnyOf(CharSet::new(chars)))
    }

    /// A node matching one character outside `chars`.
    pub fn none_of(chars: impl IntoIterator<Item = char>) -> Self {
        Self::from_kind(NodeKind::NoneOf(CharSet::new(chars)))
    }

    /// A node matching any one character of the configured universe.
    pub fn any_printable() -> Self {
        Self::from_kind(NodeKind::AnyPrintable)
    }

    /// A single literal character.
    pub fn literal(c: char) -> Self {
        Self::from_kind(NodeKind::AnyOf(CharSet::new([c]))).with_source(c.to_string())
    }

    /// A sequence of members generated in order.
    pub fn sequence(members: Vec<GrammarNode>) -> Self {
        Self::from_kind(NodeKind::Sequence(members))
    }

    /// A choice between members; each occurrence picks one.
    pub fn alternative(members: Vec<GrammarNode>) -> Self {
        Self::from_kind(NodeKind::Alternative(members))
    }

    /// Sets how many times the node occurs.
    pub fn with_occurs(mut self, occurs: Bounds) -> Self {
        self.occurs = occurs;
        self
    }

    /// Pins the node to the start of the generated string.
    pub fn with_anchor_start(mut self) -> Self {
        self.anchor_start = true;
        self
    }

    /// Pins the node to the end of the generated string.
    pub fn with_anchor_end(mut self) -> Self {
        self.anchor_end = true;
        self
    }

    /// Records the pattern text this node was parsed from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn occurs(&self) -> Bounds {
        self.occurs
    }

    /// The pattern text this node was parsed from, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The node's pattern text, falling back to its rendered shape when the
    /// node was built rather than parsed.
    pub(crate) fn describe(&self) -> String {
        if self.source.is_empty() {
            self.to_string()
        } else {
            self.source.clone()
        }
    }

    /// The string lengths a single occurrence of this node can produce.
    pub(crate) fn occurrence_length(&self) -> Bounds {
        match &self.kind {
            NodeKind::AnyOf(_) | NodeKind::NoneOf(_) | NodeKind::AnyPrintable => Bounds::once(),
            NodeKind::Sequence(members) => members
                .iter()
                .fold(Bounds::exactly(0), |acc, m| acc.sum(m.length_bounds())),
            NodeKind::Alternative(members) => {
                let mut lengths = members.iter().map(GrammarNode::length_bounds);
                match lengths.next() {
                    None => Bounds::exactly(0),
                    Some(first) => lengths.fold(first, |acc, b| {
                        Bounds::from_parts(
                            acc.min().min(b.min()),
                            match (acc.max(), b.max()) {
                                (Some(a), Some(b)) => Some(a.max(b)),
                                _ => None,
                            },
                        )
                    }),
                }
            }
        }
    }

    /// The string lengths this node can produce across all its occurrences.
    pub fn length_bounds(&self) -> Bounds {
        self.occurrence_length().product(self.occurs)
    }

    /// The shortest string this node can produce.
    pub fn min_length(&self) -> usize {
        self.length_bounds().min()
    }

    /// The longest string this node can produce, `None` if unbounded.
    pub fn max_length(&self) -> Option<usize> {
        self.length_bounds().max()
    }

    /// Whether some length inside `bounds` is producible.
    pub fn is_feasible_length(&self, bounds: Bounds) -> bool {
        self.length_bounds().intersect(bounds).is_some()
    }

    /// Whether generation is pinned to the start of the string: the node
    /// carries its own `^`, or it starts with an anchored member.
    pub fn is_start_anchored(&self) -> bool {
        if self.anchor_start {
            return true;
        }
        match &self.kind {
            NodeKind::Alternative(members) => {
                members.iter().any(GrammarNode::is_start_anchored)
            }
            NodeKind::Sequence(members) => {
                members.first().is_some_and(GrammarNode::is_start_anchored)
            }
            _ => false,
        }
    }

    /// Whether generation is pinned to the end of the string.
    pub fn is_end_anchored(&self) -> bool {
        if self.anchor_end {
            return true;
        }
        match &self.kind {
            NodeKind::Alternative(members) => members.iter().any(GrammarNode::is_end_anchored),
            NodeKind::Sequence(members) => {
                members.last().is_some_and(GrammarNode::is_end_anchored)
            }
            _ => false,
        }
    }

    /// Surrounds the unanchored edges of the tree with `.*`-style filler so
    /// the pattern may match anywhere inside the generated string, the way an
    /// unanchored regex search would.
    ///
    /// Anchored edges are left alone, and the filler is pushed as deep as the
    /// structure allows: each branch of an alternative is padded on its own,
    /// so `(^a|b)` sees only the `b` branch padded.
    pub fn padded(self) -> Self {
        self.pad_start().pad_end()
    }

    fn padding() -> Self {
        GrammarNode::any_printable().with_occurs(Bounds::at_least(0))
    }

    fn pad_start(self) -> Self {
        if self.anchor_start {
            return self;
        }
        let GrammarNode {
            kind,
            occurs,
            anchor_start,
            anchor_end,
            source,
        } = self;
        match kind {
            NodeKind::Alternative(members) if occurs == Bounds::once() => GrammarNode {
                kind: NodeKind::Alternative(
                    members.into_iter().map(GrammarNode::pad_start).collect(),
                ),
                occurs,
                anchor_start,
                anchor_end,
                source,
            },
            NodeKind::Sequence(mut members)
                if occurs == Bounds::once() && !members.is_empty() =>
            {
                let first = members.remove(0).pad_start();
                members.insert(0, first);
                GrammarNode {
                    kind: NodeKind::Sequence(members),
                    occurs,
                    anchor_start,
                    anchor_end,
                    source,
                }
            }
            kind => {
                let node = GrammarNode {
                    kind,
                    occurs,
                    anchor_start,
                    anchor_end,
                    source,
                };
                if node.is_start_anchored() {
                    node
                } else {
                    GrammarNode::sequence(vec![GrammarNode::padding(), node])
                }
            }
        }
    }

    fn pad_end(self) -> Self {
        if self.anchor_end {
            return self;
        }
        let GrammarNode {
            kind,
            occurs,
            anchor_start,
            anchor_end,
            source,
        } = self;
        match kind {
            NodeKind::Alternative(members) if occurs == Bounds::once() => GrammarNode {
                kind: NodeKind::Alternative(
                    members.into_iter().map(GrammarNode::pad_end).collect(),
                ),
                occurs,
                anchor_start,
                anchor_end,
                source,
            },
            NodeKind::Sequence(mut members)
                if occurs == Bounds::once() && !members.is_empty() =>
            {
                if let Some(last) = members.pop() {
                    members.push(last.pad_end());
                }
                GrammarNode {
                    kind: NodeKind::Sequence(members),
                    occurs,
                    anchor_start,
                    anchor_end,
                    source,
                }
            }
            kind => {
                let node = GrammarNode {
                    kind,
                    occurs,
                    anchor_start,
                    anchor_end,
                    source,
                };
                if node.is_end_anchored() {
                    node
                } else {
                    GrammarNode::sequence(vec![node, GrammarNode::padding()])
                }
            }
        }
    }
}

impl fmt::Display for GrammarNode {
    /// Diagnostic rendering in a regex-like syntax. Characters are printed
    /// raw, so the output is not guaranteed to re-parse.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchor_start {
            write!(f, "^")?;
        }
        let grouped = self.occurs != Bounds::once();
        match &self.kind {
            NodeKind::AnyOf(set) if set.len() == 1 => write!(f, "{}", set.get(0))?,
            NodeKind::AnyOf(set) => write!(f, "[{set}]")?,
            NodeKind::NoneOf(set) => write!(f, "[^{set}]")?,
            NodeKind::AnyPrintable => write!(f, ".")?,
            NodeKind::Sequence(members) => {
                if grouped {
                    write!(f, "(?:")?;
                }
                for member in members {
                    write!(f, "{member}")?;
                }
                if grouped {
                    write!(f, ")")?;
                }
            }
            NodeKind::Alternative(members) => {
                write!(f, "(?:")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{member}")?;
                }
                write!(f, ")")?;
            }
        }
        match (self.occurs.min(), self.occurs.max()) {
            (1, Some(1)) => {}
            (0, Some(1)) => write!(f, "?")?,
            (0, None) => write!(f, "*")?,
            (1, None) => write!(f, "+")?,
            _ => write!(f, "{}", self.occurs)?,
        }
        if self.anchor_end {
            write!(f, "$")?;
        }
        Ok(())
    }
}

//! Initial-chain analysis: which characters can open a match.

use rexgen_grammar::{CharSet, GrammarNode, NodeKind};

/// One way the pattern can supply the first character of a match: the run
/// of class nodes reachable at position 0 before the first node that must
/// consume a character.
pub(crate) struct Chain {
    /// The allowed set of each node in the run, in encounter order.
    parts: Vec<CharSet>,
    /// Whether the run ended at a mandatory node. An open chain reached the
    /// end of its path with every node still skippable, so the path can
    /// match the empty string.
    closed: bool,
}

impl Chain {
    fn open() -> Self {
        Chain {
            parts: Vec::new(),
            closed: false,
        }
    }

    /// True when no class node joined the run: the path consumes nothing.
    pub(crate) fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Union of the allowed sets of every node in the run.
    pub(crate) fn allowed(&self) -> CharSet {
        let mut union = CharSet::empty();
        for part in &self.parts {
            union.extend(part.clone());
        }
        union
    }
}

/// Collects every initial chain of `node` against the given universe.
pub(crate) fn initial_chains(node: &GrammarNode, universe: &[char]) -> Vec<Chain> {
    // A node repeated zero times is invisible to the first character.
    if node.occurs().max() == Some(0) {
        return vec![Chain::open()];
    }
    let mut chains = match node.kind() {
        NodeKind::AnyOf(set) => class_chain(set.clone(), node),
        NodeKind::NoneOf(set) => {
            class_chain(CharSet::new(set.complement_within(universe)), node)
        }
        NodeKind::AnyPrintable => {
            class_chain(CharSet::new(universe.iter().copied()), node)
        }
        NodeKind::Alternative(members) => {
            if members.is_empty() {
                return vec![Chain::open()];
            }
            members
                .iter()
                .flat_map(|m| initial_chains(m, universe))
                .collect()
        }
        NodeKind::Sequence(members) => {
            let mut chains = vec![Chain::open()];
            for member in members {
                if chains.iter().all(|c| c.closed) {
                    break;
                }
                let member_chains = initial_chains(member, universe);
                let mut extended = Vec::new();
                for chain in chains {
                    if chain.closed {
                        extended.push(chain);
                        continue;
                    }
                    for mc in &member_chains {
                        let mut parts = chain.parts.clone();
                        parts.extend(mc.parts.iter().cloned());
                        extended.push(Chain {
                            parts,
                            closed: mc.closed,
                        });
                    }
                }
                chains = extended;
            }
            chains
        }
    };
    // An optional node cannot demand a character, so its chains stay open
    // for whatever follows it.
    if node.occurs().min() == 0 {
        for chain in &mut chains {
            chain.closed = false;
        }
    }
    chains
}

fn class_chain(allowed: CharSet, node: &GrammarNode) -> Vec<Chain> {
    vec![Chain {
        parts: vec![allowed],
        closed: node.occurs().min() > 0,
    }]
}

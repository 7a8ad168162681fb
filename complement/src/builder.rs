//! Assembles the not-matching tree from the initial-chain analysis.

use rexgen_core::{Bounds, GenOptions};
use rexgen_grammar::{CharSet, GrammarNode};

use crate::chain::initial_chains;

/// How many mismatch characters the opening class keeps, in universe order.
/// The full complement of a small class would span nearly the whole
/// universe.
const MISMATCH_CLASS_LIMIT: usize = 32;

/// Builds a tree generating strings guaranteed not to match `root`.
///
/// `root` must be an exact (unpadded) parse of the pattern. The result is
/// anchored at both ends. `None` means no complement can be constructed:
/// for a pattern like `.*` every candidate string is a match.
pub fn not_matching(root: &GrammarNode, options: &GenOptions) -> Option<GrammarNode> {
    let universe = options.printable();
    let chains = initial_chains(root, universe);

    let empty = chains.iter().filter(|c| c.is_empty()).count();
    if empty == chains.len() {
        // Every path consumes nothing: the pattern matches only the empty
        // string, so any non-empty string is a mismatch.
        return Some(
            GrammarNode::any_printable()
                .with_occurs(Bounds::at_least(1))
                .with_anchor_start()
                .with_anchor_end(),
        );
    }
    if empty > 0 {
        // Some path matches the empty string while others constrain the
        // first character; neither lever is safe on its own.
        return None;
    }

    let mut allowed = CharSet::empty();
    for chain in &chains {
        allowed.extend(chain.allowed());
    }
    let mismatch: CharSet = universe
        .iter()
        .copied()
        .filter(|&c| !allowed.contains(c))
        .take(MISMATCH_CLASS_LIMIT)
        .collect();

    let mut branches = Vec::new();
    if !mismatch.is_empty() {
        // Open with a character no match can open with, then anything.
        branches.push(GrammarNode::sequence(vec![
            GrammarNode::any_of(mismatch),
            GrammarNode::any_printable().with_occurs(Bounds::at_least(0)),
        ]));
    }
    let min = root.min_length();
    if min > 0 {
        // Stay shorter than the shortest match, drawn only from characters
        // that can legally start one.
        branches.push(GrammarNode::any_of(allowed).with_occurs(Bounds::new(0, min - 1)));
    }

    let node = match branches.len() {
        0 => return None,
        1 => branches.remove(0),
        _ => GrammarNode::alternative(branches),
    };
    Some(node.with_anchor_start().with_anchor_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rexgen_grammar::NodeKind;
    use rexgen_parser::parse;

    fn complement_of(pattern: &str) -> Option<GrammarNode> {
        let node = parse(pattern, true).unwrap();
        not_matching(&node, &GenOptions::default())
    }

    fn branches(node: &GrammarNode) -> &[GrammarNode] {
        match node.kind() {
            NodeKind::Alternative(branches) => branches,
            other => panic!("Expected alternative, got {:?}", other),
        }
    }

    #[test]
    fn test_single_literal_has_both_branches() {
        let node = complement_of("a").unwrap();
        assert!(node.is_start_anchored());
        assert!(node.is_end_anchored());
        let branches = branches(&node);
        assert_eq!(branches.len(), 2);
        // Wrong first character, then anything.
        match branches[0].kind() {
            NodeKind::Sequence(members) => {
                match members[0].kind() {
                    NodeKind::AnyOf(set) => {
                        assert!(!set.contains('a'));
                        assert_eq!(set.len(), MISMATCH_CLASS_LIMIT);
                    }
                    other => panic!("Expected AnyOf, got {:?}", other),
                }
                assert_eq!(members[1].kind(), &NodeKind::AnyPrintable);
                assert_eq!(members[1].occurs(), Bounds::at_least(0));
            }
            other => panic!("Expected sequence, got {:?}", other),
        }
        // Too short: zero characters.
        assert_eq!(branches[1].occurs(), Bounds::new(0, 0));
    }

    #[test]
    fn test_optional_prefix_widens_the_excluded_set() {
        let node = complement_of("a?b").unwrap();
        let branches = branches(&node);
        match branches[0].kind() {
            NodeKind::Sequence(members) => match members[0].kind() {
                NodeKind::AnyOf(set) => {
                    assert!(!set.contains('a'));
                    assert!(!set.contains('b'));
                }
                other => panic!("Expected AnyOf, got {:?}", other),
            },
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_min_length_bounds_the_short_branch() {
        let node = complement_of("[0-9]{2,}").unwrap();
        let branches = branches(&node);
        match branches[1].kind() {
            NodeKind::AnyOf(set) => {
                assert!(set.contains('0'));
                assert!(set.contains('9'));
            }
            other => panic!("Expected AnyOf, got {:?}", other),
        }
        assert_eq!(branches[1].occurs(), Bounds::new(0, 1));
    }

    #[test]
    fn test_empty_only_pattern_complements_to_any_non_empty() {
        for pattern in ["", "^$"] {
            let node = complement_of(pattern).unwrap();
            assert_eq!(node.kind(), &NodeKind::AnyPrintable);
            assert_eq!(node.occurs(), Bounds::at_least(1));
            assert!(node.is_start_anchored());
            assert!(node.is_end_anchored());
        }
    }

    #[test]
    fn test_match_everything_pattern_is_infeasible() {
        assert!(complement_of(".*").is_none());
    }

    #[test]
    fn test_mixed_empty_branch_is_infeasible() {
        assert!(complement_of("(|a)").is_none());
        assert!(complement_of("a|").is_none());
    }

    #[test]
    fn test_dot_plus_complements_to_empty_string_only() {
        // Every non-empty string matches `.+`, so only "" is left.
        let node = complement_of(".+").unwrap();
        assert_eq!(node.length_bounds(), Bounds::new(0, 0));
        let out = node
            .generate(
                &GenOptions::default(),
                &mut StdRng::seed_from_u64(1),
                Bounds::new(0, 10),
            )
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_generated_strings_avoid_the_pattern() {
        let node = complement_of("ab").unwrap();
        let options = GenOptions::default();
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = node.generate(&options, &mut rng, Bounds::new(0, 12)).unwrap();
            // Either too short to be a match, or opened by a character no
            // match can open with.
            let too_short = out.chars().count() < 2;
            let wrong_start = !out.starts_with('a');
            assert!(too_short || wrong_start, "{out:?} might match");
            assert_ne!(out, "ab");
        }
    }
}

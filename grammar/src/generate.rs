//! Random string generation over the grammar tree.
//!
//! Generation is budget driven: the caller hands the root node a length
//! window, and every composite node splits its share of the budget across
//! occurrences and members before recursing. Draws are biased toward the
//! low end only as far as feasibility requires; inside the window the draw
//! is uniform.

use rexgen_core::{Bounds, GenOptions, RandomSource};

use crate::{GenerateError, GenerateResult, GrammarNode, NodeKind};

impl GrammarNode {
    /// Generates one random string whose length falls inside `bounds`.
    ///
    /// `bounds` is intersected with [`length_bounds`](Self::length_bounds)
    /// first; an empty intersection is reported as
    /// [`GenerateError::InfeasibleLength`] without consuming randomness.
    pub fn generate<R: RandomSource>(
        &self,
        options: &GenOptions,
        rng: &mut R,
        bounds: Bounds,
    ) -> GenerateResult<String> {
        let feasible = self.length_bounds();
        let window = bounds
            .intersect(feasible)
            .ok_or(GenerateError::InfeasibleLength {
                requested: bounds,
                feasible,
            })?;
        match self.kind() {
            NodeKind::AnyOf(set) => self.draw_from(rng, window, set.as_slice()),
            NodeKind::NoneOf(set) => {
                let allowed = set.complement_within(options.printable());
                self.draw_from(rng, window, &allowed)
            }
            NodeKind::AnyPrintable => self.draw_from(rng, window, options.printable()),
            NodeKind::Sequence(members) => self.run_sequence(members, options, rng, window),
            NodeKind::Alternative(members) => self.run_alternative(members, options, rng, window),
        }
    }

    /// Draws a window-sized run of characters from `chars`.
    fn draw_from<R: RandomSource>(
        &self,
        rng: &mut R,
        window: Bounds,
        chars: &[char],
    ) -> GenerateResult<String> {
        let count = rng.within(window);
        if count == 0 {
            return Ok(String::new());
        }
        if chars.is_empty() {
            return Err(GenerateError::EmptyClass {
                class: self.describe(),
            });
        }
        Ok((0..count).map(|_| chars[rng.below(chars.len())]).collect())
    }

    fn run_sequence<R: RandomSource>(
        &self,
        members: &[GrammarNode],
        options: &GenOptions,
        rng: &mut R,
        window: Bounds,
    ) -> GenerateResult<String> {
        let per = self.occurrence_length();
        let occ_window = window
            .divided_by(per)
            .and_then(|w| w.intersect(self.occurs()))
            .ok_or_else(|| GenerateError::DeadEnd {
                node: self.describe(),
            })?;
        let total = rng.within(occ_window);

        // Length range of each member, plus suffix sums so any position
        // knows how much the rest of the occurrence still needs and can take.
        let member_lengths: Vec<Bounds> =
            members.iter().map(GrammarNode::length_bounds).collect();
        let mut suffix = vec![Bounds::exactly(0); members.len() + 1];
        for (i, b) in member_lengths.iter().enumerate().rev() {
            suffix[i] = b.sum(suffix[i + 1]);
        }

        let mut out = String::new();
        let mut produced = 0usize;
        for occ in 0..total {
            let later_occurrences = per.product(Bounds::exactly(total - occ - 1));
            for (i, member) in members.iter().enumerate() {
                let tail = suffix[i + 1].sum(later_occurrences);
                let need = window.min().saturating_sub(produced);
                let room = window.max().map(|max| max.saturating_sub(produced));
                // Largest share the tail can spare, smallest it still allows.
                let lo = match tail.max() {
                    Some(t) => need.saturating_sub(t),
                    None => 0,
                };
                let hi = match (room, member_lengths[i].max()) {
                    (Some(r), Some(m)) => Some(m.min(r.saturating_sub(tail.min()))),
                    (Some(r), None) => Some(r.saturating_sub(tail.min())),
                    (None, m) => m,
                };
                let piece = generate_relaxed(member, options, rng, lo, hi)?;
                produced += piece.chars().count();
                out.push_str(&piece);
            }
        }
        Ok(out)
    }

    fn run_alternative<R: RandomSource>(
        &self,
        members: &[GrammarNode],
        options: &GenOptions,
        rng: &mut R,
        window: Bounds,
    ) -> GenerateResult<String> {
        let per = self.occurrence_length();
        let occ_window = window
            .divided_by(per)
            .and_then(|w| w.intersect(self.occurs()))
            .ok_or_else(|| GenerateError::DeadEnd {
                node: self.describe(),
            })?;
        let total = rng.within(occ_window);

        let mut out = String::new();
        let mut produced = 0usize;
        for occ in 0..total {
            let tail = per.product(Bounds::exactly(total - occ - 1));
            let need = window.min().saturating_sub(produced);
            let room = window.max().map(|max| max.saturating_sub(produced));
            let lo = match tail.max() {
                Some(t) => need.saturating_sub(t),
                None => 0,
            };
            let hi = room.map(|r| r.saturating_sub(tail.min()));
            let slot = match hi {
                Some(h) if h < lo => None,
                _ => Some(Bounds::from_parts(lo, hi)),
            };

            let mut order: Vec<usize> = (0..members.len()).collect();
            rng.shuffle(&mut order);
            let mut piece = None;
            if let Some(slot) = slot {
                for index in order {
                    let member = &members[index];
                    if member.length_bounds().intersect(slot).is_none() {
                        continue;
                    }
                    match member.generate(options, rng, slot) {
                        Ok(s) => {
                            piece = Some(s);
                            break;
                        }
                        Err(e @ GenerateError::EmptyClass { .. }) => return Err(e),
                        Err(_) => continue,
                    }
                }
            }
            match piece {
                Some(s) => {
                    produced += s.chars().count();
                    out.push_str(&s);
                }
                // No branch fits the remaining budget: stop repeating rather
                // than emit a string the pattern cannot match.
                None => break,
            }
        }
        Ok(out)
    }
}

/// Generates `member` inside `[lo, hi]`, lowering `lo` one character at a
/// time toward the member's own minimum if the first attempts come up
/// infeasible. Once the floor fails too, the budget cannot be met.
fn generate_relaxed<R: RandomSource>(
    member: &GrammarNode,
    options: &GenOptions,
    rng: &mut R,
    lo: usize,
    hi: Option<usize>,
) -> GenerateResult<String> {
    let floor = member.min_length();
    let mut lo = lo.max(floor);
    loop {
        let attempt = match hi {
            Some(h) if h < lo => Err(GenerateError::DeadEnd {
                node: member.describe(),
            }),
            _ => member.generate(options, rng, Bounds::from_parts(lo, hi)),
        };
        match attempt {
            Ok(s) => return Ok(s),
            Err(e @ GenerateError::EmptyClass { .. }) => return Err(e),
            Err(_) if lo > floor => lo -= 1,
            Err(_) => {
                return Err(GenerateError::DeadEnd {
                    node: member.describe(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rexgen_core::UNBOUNDED_DRAW_SPREAD;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_literal_sequence_generates_itself() {
        let node = GrammarNode::sequence(vec![
            GrammarNode::literal('a'),
            GrammarNode::literal('b'),
            GrammarNode::literal('c'),
        ]);
        let out = node
            .generate(&GenOptions::default(), &mut rng(1), Bounds::new(0, 10))
            .unwrap();
        assert_eq!(out, "abc");
    }

    #[test]
    fn test_class_length_stays_inside_window() {
        let node = GrammarNode::any_of("ab".chars()).with_occurs(Bounds::new(2, 4));
        for seed in 0..50 {
            let out = node
                .generate(&GenOptions::default(), &mut rng(seed), Bounds::new(0, 10))
                .unwrap();
            assert!((2..=4).contains(&out.chars().count()), "bad length: {out:?}");
            assert!(out.chars().all(|c| c == 'a' || c == 'b'));
        }
    }

    #[test]
    fn test_exact_repetition_is_forced() {
        let node = GrammarNode::literal('a').with_occurs(Bounds::exactly(3));
        let out = node
            .generate(&GenOptions::default(), &mut rng(9), Bounds::new(0, 10))
            .unwrap();
        assert_eq!(out, "aaa");
    }

    #[test]
    fn test_infeasible_window_is_an_error() {
        let node = GrammarNode::literal('a').with_occurs(Bounds::exactly(3));
        let err = node
            .generate(&GenOptions::default(), &mut rng(9), Bounds::new(0, 2))
            .unwrap_err();
        match err {
            GenerateError::InfeasibleLength { requested, feasible } => {
                assert_eq!(requested, Bounds::new(0, 2));
                assert_eq!(feasible, Bounds::exactly(3));
            }
            other => panic!("expected InfeasibleLength, got {other:?}"),
        }
    }

    #[test]
    fn test_alternative_honors_the_window() {
        // Only the `bb` branch can fill a window of exactly two characters.
        let node = GrammarNode::alternative(vec![
            GrammarNode::literal('a'),
            GrammarNode::literal('b').with_occurs(Bounds::exactly(2)),
        ]);
        for seed in 0..20 {
            let out = node
                .generate(&GenOptions::default(), &mut rng(seed), Bounds::exactly(2))
                .unwrap();
            assert_eq!(out, "bb");
        }
    }

    #[test]
    fn test_none_of_avoids_excluded_characters() {
        let node = GrammarNode::none_of("ab".chars()).with_occurs(Bounds::exactly(5));
        let out = node
            .generate(&GenOptions::default(), &mut rng(3), Bounds::new(0, 10))
            .unwrap();
        assert_eq!(out.chars().count(), 5);
        assert!(out.chars().all(|c| c != 'a' && c != 'b'));
        assert!(out.chars().all(|c| (' '..='~').contains(&c)));
    }

    #[test]
    fn test_empty_class_is_an_error() {
        let options = GenOptions::new().with_printable("ab".chars());
        let node = GrammarNode::none_of("ab".chars()).with_occurs(Bounds::new(1, 3));
        let err = node
            .generate(&options, &mut rng(4), Bounds::new(1, 3))
            .unwrap_err();
        assert!(matches!(err, GenerateError::EmptyClass { .. }));
    }

    #[test]
    fn test_empty_class_error_names_the_class() {
        let options = GenOptions::new().with_printable("ab".chars());
        let node = GrammarNode::none_of("ab".chars()).with_occurs(Bounds::new(1, 3));
        let err = node
            .generate(&options, &mut rng(4), Bounds::new(1, 3))
            .unwrap_err();
        match &err {
            GenerateError::EmptyClass { class } => assert!(class.contains("[^ab]"), "{class}"),
            other => panic!("Expected EmptyClass, got {other:?}"),
        }
        assert!(err.to_string().contains("no characters to draw from"));
        // The class rendering is plain context, not an error cause.
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_parity_gap_window_dead_ends() {
        // (aa){1,2} produces lengths {2, 4}; a window of exactly 3 cannot
        // be tiled.
        let tree = GrammarNode::sequence(vec![
            GrammarNode::literal('a'),
            GrammarNode::literal('a'),
        ])
        .with_occurs(Bounds::new(1, 2));
        let err = tree
            .generate(&GenOptions::default(), &mut rng(7), Bounds::exactly(3))
            .unwrap_err();
        match err {
            GenerateError::DeadEnd { node } => assert!(node.contains("aa"), "{node}"),
            other => panic!("Expected DeadEnd, got {other:?}"),
        }
    }

    #[test]
    fn test_unbounded_repetition_is_capped() {
        let node = GrammarNode::literal('a').with_occurs(Bounds::at_least(0));
        for seed in 0..20 {
            let out = node
                .generate(&GenOptions::default(), &mut rng(seed), Bounds::at_least(0))
                .unwrap();
            assert!(out.chars().count() <= UNBOUNDED_DRAW_SPREAD);
        }
    }

    #[test]
    fn test_budget_forces_greedy_member() {
        // With exactly five characters to spend, `a*` must supply four.
        let node = GrammarNode::sequence(vec![
            GrammarNode::literal('a').with_occurs(Bounds::at_least(0)),
            GrammarNode::literal('b'),
        ]);
        for seed in 0..20 {
            let out = node
                .generate(&GenOptions::default(), &mut rng(seed), Bounds::exactly(5))
                .unwrap();
            assert_eq!(out, "aaaab");
        }
    }

    #[test]
    fn test_budget_steers_alternative_choice() {
        let node = GrammarNode::sequence(vec![
            GrammarNode::alternative(vec![
                GrammarNode::literal('a'),
                GrammarNode::literal('b').with_occurs(Bounds::exactly(3)),
            ]),
            GrammarNode::literal('c'),
        ]);
        for seed in 0..20 {
            let out = node
                .generate(&GenOptions::default(), &mut rng(seed), Bounds::exactly(4))
                .unwrap();
            assert_eq!(out, "bbbc");
        }
    }

    #[test]
    fn test_same_seed_reproduces_output() {
        let node = GrammarNode::sequence(vec![
            GrammarNode::any_of("abc".chars()).with_occurs(Bounds::new(1, 8)),
            GrammarNode::none_of("x".chars()).with_occurs(Bounds::new(0, 4)),
        ]);
        let first = node
            .generate(&GenOptions::default(), &mut rng(42), Bounds::new(0, 20))
            .unwrap();
        let second = node
            .generate(&GenOptions::default(), &mut rng(42), Bounds::new(0, 20))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_sequence_generates_empty_string() {
        let node = GrammarNode::sequence(Vec::new());
        let out = node
            .generate(&GenOptions::default(), &mut rng(5), Bounds::new(0, 10))
            .unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_padded_tree_embeds_the_match() {
        let node = GrammarNode::sequence(vec![
            GrammarNode::literal('q'),
            GrammarNode::literal('z'),
        ])
        .padded();
        for seed in 0..30 {
            let out = node
                .generate(&GenOptions::default(), &mut rng(seed), Bounds::new(0, 40))
                .unwrap();
            assert!(out.contains("qz"), "{out:?} lost the payload");
        }
    }
}

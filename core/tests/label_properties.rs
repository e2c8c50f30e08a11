//! Property-based tests for labelling and scanning.
//!
//! Checked over random alphabets, candidate counts and texts:
//! - labels are distinct, prefix-free and drawn from the alphabet
//! - every label resolves back to its own candidate
//! - up to K^2 candidates, label length never decreases along the ranking,
//!   so a target nearer the caret never gets a longer label
//! - re-filtering a narrowed table changes nothing
//! - scanner output is ascending, in range and spaced

use jumpmotion_core::{
    rank, scan, Alphabet, Candidate, JumpAssociation, JumpTable, LabelTree, Narrowing,
    RankingMode, Rect, StrView, TextView, MIN_SPACING,
};
use proptest::prelude::*;

fn arb_alphabet() -> impl Strategy<Value = String> {
    prop::sample::subsequence("asdfghjklqwertyuiop;".chars().collect::<Vec<_>>(), 2..=12)
        .prop_shuffle()
        .prop_map(|keys| keys.into_iter().collect())
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9 .,;()\n\t]{0,120}").unwrap()
}

fn build(keys: &str, count: usize) -> (Alphabet, LabelTree) {
    let alphabet = Alphabet::new(keys).unwrap();
    let tree = LabelTree::build(count, &alphabet).unwrap();
    (alphabet, tree)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn labels_are_prefix_free(keys in arb_alphabet(), count in 0usize..400) {
        let (alphabet, tree) = build(&keys, count);
        let labels = tree.labels();
        prop_assert_eq!(labels.len(), count);

        for (i, a) in labels.iter().enumerate() {
            prop_assert!(!a.is_empty());
            prop_assert!(a.chars().all(|c| alphabet.contains(c)), "{:?} uses foreign keys", a);
            for (j, b) in labels.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a.as_str()), "{:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn labels_resolve_to_their_candidate(keys in arb_alphabet(), count in 0usize..400) {
        let (_, tree) = build(&keys, count);
        for (i, label) in tree.labels().iter().enumerate() {
            prop_assert_eq!(tree.resolve(label), Some(i));
        }
        prop_assert_eq!(tree.assignments().len(), count);
    }

    #[test]
    fn label_length_follows_rank(keys in arb_alphabet(), fill in 0.0f64..=1.0) {
        let k = keys.chars().count();
        let count = ((k * k) as f64 * fill) as usize;
        let (_, tree) = build(&keys, count);
        let lengths: Vec<usize> = tree.labels().iter().map(|l| l.chars().count()).collect();
        prop_assert!(lengths.windows(2).all(|w| w[0] <= w[1]), "lengths {:?}", lengths);
        prop_assert!(lengths.iter().all(|&l| l <= 2));
    }

    #[test]
    fn nearer_targets_never_get_longer_labels(
        keys in arb_alphabet(),
        gaps in prop::collection::vec(3usize..12, 0..60),
        caret in 0usize..400,
    ) {
        let k = keys.chars().count();
        let mut position = 0;
        let mut candidates = Vec::new();
        for gap in gaps.iter().take(k * k) {
            candidates.push(Candidate::new(position, false, Rect::default()));
            position += gap;
        }

        let ranked = rank(candidates, RankingMode::CaretRelative, caret);
        let (_, tree) = build(&keys, ranked.len());
        for (i, a) in ranked.iter().enumerate() {
            for (j, b) in ranked.iter().enumerate() {
                if a.distance_to_caret < b.distance_to_caret {
                    prop_assert!(
                        tree.labels()[i].len() <= tree.labels()[j].len(),
                        "target at {} is nearer than {} but has a longer label",
                        a.position,
                        b.position
                    );
                }
            }
        }
    }

    #[test]
    fn refiltering_is_idempotent(keys in arb_alphabet(), count in 1usize..200, pick in any::<prop::sample::Index>()) {
        let (_, tree) = build(&keys, count);
        let mut table = JumpTable::new();
        for (i, label) in tree.labels().iter().enumerate() {
            table.push(JumpAssociation {
                label: label.clone(),
                position: i * MIN_SPACING,
                next_is_control: false,
                bounds: Rect::default(),
                handle: None,
            });
        }

        let target = &tree.labels()[pick.index(count)];
        let first = target.chars().next().unwrap();
        match table.narrow(first) {
            Narrowing::Exact(i) => prop_assert_eq!(&tree.labels()[i], target),
            Narrowing::Narrowed { .. } => {
                prop_assert!(table.retain_matching().is_empty());
                prop_assert!(table.associations().iter().any(|a| &a.label == target));
            }
            Narrowing::Empty => prop_assert!(false, "first key of a label must match"),
        }
    }

    #[test]
    fn scanner_output_is_ordered_and_spaced(text in arb_text()) {
        let view = StrView::new(&text);
        let range = view.visible_range();
        let candidates = scan(&view, range.clone());
        for c in &candidates {
            prop_assert!(range.contains(&c.position));
        }
        for pair in candidates.windows(2) {
            prop_assert!(pair[1].position >= pair[0].position + MIN_SPACING);
        }
    }
}

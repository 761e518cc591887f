// Test pattern alignment: directional/symmetric distances and their invariants

use rhythm_edit::{distance, distance_with_direction, RhythmPattern, RhythmPatternNote};

/// Helper to build a pattern from (duration, cluster) pairs
fn make_pattern(leading_rest: i32, notes: &[(i32, i32)]) -> RhythmPattern {
    RhythmPattern::from_notes(
        leading_rest,
        notes
            .iter()
            .map(|&(d, c)| RhythmPatternNote::new(d, c))
            .collect(),
    )
}

/// A handful of patterns with varied rests, durations and cluster shapes
fn sample_patterns() -> Vec<RhythmPattern> {
    vec![
        RhythmPattern::new(),
        make_pattern(0, &[(16, 0)]),
        make_pattern(4, &[(8, 0), (8, 1)]),
        make_pattern(0, &[(16, 0), (16, -1), (8, -2), (8, -1), (8, 0), (8, -4)]),
        make_pattern(2, &[(4, 3), (4, 3), (4, 3), (4, 2)]),
        make_pattern(0, &[(1, 0), (2, 1), (1, 0), (2, 1), (1, 0)]),
    ]
}

#[test]
fn test_self_distance_is_zero() {
    for p in sample_patterns() {
        assert_eq!(distance_with_direction(&p, &p), 0);
        assert_eq!(distance(&p, &p), 0);
    }
}

#[test]
fn test_distance_is_symmetric_and_bounded_by_both_directions() {
    let patterns = sample_patterns();
    for a in &patterns {
        for b in &patterns {
            let ab = distance_with_direction(a, b);
            let ba = distance_with_direction(b, a);
            let sym = distance(a, b);

            assert_eq!(sym, distance(b, a), "symmetric distance must commute");
            assert!(sym <= ab, "distance may not exceed forward direction");
            assert!(sym <= ba, "distance may not exceed reverse direction");
            assert_eq!(sym, ab.min(ba));
        }
    }
}

#[test]
fn test_directional_distance_is_asymmetric_in_general() {
    // Shrinking can retarget the first note via the rank-free replace
    // and then drop a now-duplicated note cheaply; growing back has to
    // pay for cluster 1 before anything references it.
    let a = make_pattern(0, &[(4, 1), (4, 0)]);
    let b = make_pattern(0, &[(4, 0)]);

    let shrink = distance_with_direction(&a, &b);
    let grow = distance_with_direction(&b, &a);
    assert_eq!(shrink, 8);
    assert_eq!(grow, 12);
    assert_eq!(distance(&a, &b), 8);
}

#[test]
fn test_repeated_cluster_inserts_pay_rank_once() {
    // A real sequence appending (4,1) twice pays the new rank on the
    // first insert only; the aligner must find that same total.
    let small = make_pattern(0, &[(4, 0)]);
    let large = make_pattern(0, &[(4, 0), (4, 1), (4, 1)]);

    let mut scratch = small.clone();
    let sequence_cost =
        scratch.insert_note(1, RhythmPatternNote::new(4, 1))
            + scratch.insert_note(2, RhythmPatternNote::new(4, 1));
    assert_eq!(scratch, large);
    assert_eq!(sequence_cost, 16);

    assert_eq!(distance_with_direction(&small, &large), sequence_cost);
}

#[test]
fn test_directional_distance_is_an_achievable_sequence_cost() {
    // Replaying the aligner's implied edits as real mutator calls must
    // reproduce the reported distance exactly.
    let source = make_pattern(0, &[(16, 0), (16, -1), (8, -2), (8, -1), (8, 0), (8, -4)]);
    let target = make_pattern(0, &[(16, 0), (16, -1), (8, -2), (8, 0), (8, 3), (8, 4)]);

    let mut scratch = source.clone();
    let mut sequence_cost = 0;
    for (i, &n) in target.notes.iter().enumerate() {
        sequence_cost += scratch.replace_note(i, n);
    }
    assert_eq!(scratch, target);

    assert_eq!(distance_with_direction(&source, &target), sequence_cost);
}

#[test]
fn test_distance_counts_replacement_over_delete_insert() {
    // One changed duration on an otherwise identical pattern must align
    // diagonally: |8 - 4| = 4, cheaper than any delete+insert pair.
    let a = make_pattern(0, &[(8, 0), (8, 1), (8, 0)]);
    let b = make_pattern(0, &[(8, 0), (4, 1), (8, 0)]);
    assert_eq!(distance_with_direction(&a, &b), 4);
    assert_eq!(distance(&a, &b), 4);
}

#[test]
fn test_rest_only_difference() {
    let a = make_pattern(0, &[(8, 0)]);
    let b = make_pattern(8, &[(8, 0)]);
    assert_eq!(distance(&a, &b), 8);
}

#[test]
fn test_one_measure_scenario() {
    // Six successive appends build one 4/4 measure at 16 ticks per
    // quarter note
    let mut source = RhythmPattern::new();
    for (duration, cluster) in [(16, 0), (16, -1), (8, -2), (8, -1), (8, 0), (8, -4)] {
        let at = source.len();
        source.insert_note(at, RhythmPatternNote::new(duration, cluster));
    }
    assert_eq!(source.len(), 6);
    assert_eq!(source.total_duration(), 64);

    // Copy, then rewrite the tail of the contour
    let mut target = source.clone();
    target.replace_note(5, RhythmPatternNote::new(8, 4));
    target.replace_note(4, RhythmPatternNote::new(8, 3));
    target.replace_note(3, RhythmPatternNote::new(8, 0));
    assert_eq!(source.len(), 6, "copy must leave the original untouched");

    let forward = distance_with_direction(&source, &target);
    let reverse = distance_with_direction(&target, &source);
    let sym = distance(&source, &target);

    assert!(forward > 0 && reverse > 0);
    assert_eq!(sym, forward.min(reverse));

    // Three substitutions along the diagonal: a cluster swap within the
    // live set (4), plus two swaps that each disturb the rank order (12)
    assert_eq!(forward, 28);
}

#[test]
fn test_alignment_never_mutates_inputs() {
    let a = make_pattern(3, &[(8, 0), (4, 1)]);
    let b = make_pattern(0, &[(2, 5)]);
    let a_before = a.clone();
    let b_before = b.clone();

    distance_with_direction(&a, &b);
    distance_with_direction(&b, &a);
    distance(&a, &b);

    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

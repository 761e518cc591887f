//! Pattern alignment: generalized weighted edit distance
//!
//! A Wagner-Fischer dynamic program over the two note sequences, with a
//! leading-rest lane folded into the origin cell. At DP state (i, j) the
//! first i source notes have been consumed and the first j target notes
//! produced, so a real edit sequence reaching that state holds the
//! working pattern `target[..j] ++ source[i..]`. Each move is charged by
//! the same cost functions the mutators use, against that working copy.
//! Every DP path therefore totals exactly the cost of its left-to-right
//! mutator sequence, and the table minimizes over them.
//!
//! The directional distance is asymmetric in general: rank charges
//! depend on how the working pattern's live-cluster set evolves, and
//! that evolution starts from the source.

use crate::models::core::RhythmPattern;

/// Minimum total cost of transforming `source` into `target` using
/// insert/delete/replace/adjust-leading-rest edits.
///
/// Equals the cost of the cheapest valid sequence of mutator calls
/// performing the transformation. Inputs are never mutated; the cost
/// computation runs against private working copies. Patterns run to
/// tens of notes per measure, so rebuilding the working copy per cell
/// is fine.
pub fn distance_with_direction(source: &RhythmPattern, target: &RhythmPattern) -> u32 {
    let n = source.len();
    let m = target.len();

    // Working copy held by an edit sequence at state (i, j)
    let working = |i: usize, j: usize| -> RhythmPattern {
        let mut notes = Vec::with_capacity(j + n - i);
        notes.extend_from_slice(&target.notes[..j]);
        notes.extend_from_slice(&source.notes[i..]);
        RhythmPattern {
            leading_rest: source.leading_rest,
            notes,
        }
    };

    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    dp[0][0] = RhythmPattern::rest_cost(source.leading_rest, target.leading_rest);

    for i in 1..=n {
        dp[i][0] = dp[i - 1][0] + working(i - 1, 0).delete_cost(0);
    }
    for j in 1..=m {
        dp[0][j] = dp[0][j - 1] + working(0, j - 1).insert_cost(&target.notes[j - 1]);
    }

    for i in 1..=n {
        for j in 1..=m {
            // source note i-1 sits at position j of the working copy
            let replace = dp[i - 1][j - 1]
                + working(i - 1, j - 1).replace_cost(j - 1, &target.notes[j - 1]);
            let delete = dp[i - 1][j] + working(i - 1, j).delete_cost(j);
            let insert = dp[i][j - 1] + working(i, j - 1).insert_cost(&target.notes[j - 1]);
            dp[i][j] = replace.min(delete).min(insert);
        }
    }

    log::debug!(
        "aligned {} -> {} notes, directional distance {}",
        n,
        m,
        dp[n][m]
    );
    dp[n][m]
}

/// Symmetric distance: the cheaper of the two transformation directions.
pub fn distance(a: &RhythmPattern, b: &RhythmPattern) -> u32 {
    distance_with_direction(a, b).min(distance_with_direction(b, a))
}

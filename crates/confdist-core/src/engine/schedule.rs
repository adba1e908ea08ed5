//! Balanced pair enumeration for the pairwise fill.
//!
//! A naive loop over `0 ≤ i < j < n` gives index 0 a share of `n−1`
//! comparisons and index `n−2` a single one, which ruins load balance when
//! pairs are parallelized by outer index. The folding scheme here is the
//! circle method used for round-robin tournament scheduling: every row index
//! is responsible for exactly [`pairs_per_row`] evaluations, so one parallel
//! task per row receives near-identical work.
//!
//! For even `n` the folded schedule leaves exactly the `n/2` antipodal pairs
//! `(i, n/2)` uncovered; [`antipodal_pairs`] enumerates them for a second,
//! separately parallelizable pass. Together with [`folded_row_pairs`] over
//! all rows this visits every unordered pair exactly once, as does the
//! [`triangular_pairs`] fallback.

use itertools::Itertools;

/// Number of pair evaluations assigned to each row index by the folded
/// schedule: `n/2 − 1 + n%2`, and 0 when there is nothing to compare.
pub fn pairs_per_row(n: usize) -> usize {
    if n < 2 { 0 } else { n / 2 - 1 + n % 2 }
}

/// Enumerates the unordered pairs owned by `row` under the folded schedule.
///
/// The candidate pair for offset `j` is `(row, j + 1)`; when `j < row` it is
/// reflected to `(n − 1 − row, n − 1 − j)`. Every yielded pair `(i, j)`
/// satisfies `i < j`, and no pair is yielded for two different rows.
pub fn folded_row_pairs(n: usize, row: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..pairs_per_row(n)).map(move |offset| {
        if offset < row {
            (n - 1 - row, n - 1 - offset)
        } else {
            (row, offset + 1)
        }
    })
}

/// Enumerates the antipodal pairs `(i, n/2)` for `i < n/2`.
///
/// Empty for odd `n`, where the folded schedule is already complete.
pub fn antipodal_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    let half = n / 2;
    let count = if n % 2 == 0 { half } else { 0 };
    (0..count).map(move |i| (i, half))
}

/// Naive triangular enumeration of all unordered pairs, `0 ≤ i < j < n`.
pub fn triangular_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).tuple_combinations()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn balanced_pairs(n: usize) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> =
            (0..n).flat_map(|row| folded_row_pairs(n, row)).collect();
        pairs.extend(antipodal_pairs(n));
        pairs
    }

    #[test]
    fn balanced_schedule_visits_every_pair_exactly_once() {
        for n in 0..=13 {
            let visited = balanced_pairs(n);
            let unique: BTreeSet<(usize, usize)> = visited.iter().copied().collect();
            let expected: BTreeSet<(usize, usize)> = triangular_pairs(n).collect();

            assert_eq!(unique, expected, "pair sets differ for n = {}", n);
            assert_eq!(
                visited.len(),
                expected.len(),
                "duplicate pairs for n = {}",
                n
            );
        }
    }

    #[test]
    fn every_row_owns_the_same_number_of_pairs() {
        for n in 2..=13 {
            let width = pairs_per_row(n);
            for row in 0..n {
                assert_eq!(
                    folded_row_pairs(n, row).count(),
                    width,
                    "row {} unbalanced for n = {}",
                    row,
                    n
                );
            }
        }
    }

    #[test]
    fn folded_pairs_are_ordered_and_in_range() {
        for n in 2..=13 {
            for row in 0..n {
                for (i, j) in folded_row_pairs(n, row) {
                    assert!(i < j, "unordered pair ({}, {}) for n = {}", i, j, n);
                    assert!(j < n, "out-of-range pair ({}, {}) for n = {}", i, j, n);
                }
            }
        }
    }

    #[test]
    fn antipodal_pairs_exist_only_for_even_n() {
        assert_eq!(antipodal_pairs(7).count(), 0);
        let pairs: Vec<_> = antipodal_pairs(8).collect();
        assert_eq!(pairs, vec![(0, 4), (1, 4), (2, 4), (3, 4)]);
    }

    #[test]
    fn degenerate_sizes_produce_no_pairs() {
        assert_eq!(pairs_per_row(0), 0);
        assert_eq!(pairs_per_row(1), 0);
        assert_eq!(balanced_pairs(0).len(), 0);
        assert_eq!(balanced_pairs(1).len(), 0);
        assert_eq!(triangular_pairs(1).count(), 0);
    }

    #[test]
    fn triangular_count_matches_closed_form() {
        for n in 0..=13 {
            assert_eq!(triangular_pairs(n).count(), n * n.saturating_sub(1) / 2);
        }
    }
}

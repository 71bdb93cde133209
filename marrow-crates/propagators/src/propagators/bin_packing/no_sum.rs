/// The bounds implied when no subset of the candidates sums into a window `[alpha, beta]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NoSum {
    /// The largest sum below `alpha` which can be proven: every subset either sums to at most
    /// this value or exceeds `beta`.
    pub(crate) largest_below: i64,
    /// The smallest sum above `beta` which can be proven.
    pub(crate) smallest_above: i64,
}

/// Decides whether no subset of `sizes` can sum into `[alpha, beta]`, following Shaw's reasoning
/// on cardinalities.
///
/// `sizes` are non-negative and sorted in decreasing order. The sizes are split into the `m`
/// smallest and the others. A subset taking at most `k` of the others sums to at most the `k`
/// largest sizes plus the `m` smallest, while a subset taking `k + 1` of them sums to at least
/// the `k + 1` smallest of the others. The window is unreachable when it falls strictly between
/// these two sums for some `k`, where `m` is as large as the first sum allows.
///
/// The reported bounds are conservative: sums strictly between them are unreachable, but they
/// need not be reachable themselves.
///
/// Returns [`None`] when a subset may sum into the window.
pub(crate) fn no_sum(sizes: &[i64], alpha: i64, beta: i64) -> Option<NoSum> {
    let total: i64 = sizes.iter().sum();
    if alpha <= 0 || beta >= total {
        return None;
    }

    let num_sizes = sizes.len();
    let mut sum_largest = 0;
    for num_largest in 0..num_sizes {
        if sum_largest >= alpha {
            break;
        }

        // At least `num_largest + 1` sizes remain among the others.
        let mut sum_smallest = 0;
        let mut num_smallest = 0;
        while num_smallest + num_largest + 1 < num_sizes {
            let size = sizes[num_sizes - 1 - num_smallest];
            if sum_largest + sum_smallest + size >= alpha {
                break;
            }
            sum_smallest += size;
            num_smallest += 1;
        }

        let boundary = num_sizes - num_smallest;
        let smallest_above: i64 = sizes[boundary - num_largest - 1..boundary].iter().sum();
        if smallest_above > beta {
            return Some(NoSum {
                largest_below: sum_largest + sum_smallest,
                smallest_above,
            });
        }

        sum_largest += sizes[num_largest];
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [i64; 4] = [4, 3, 3, 2];

    fn has_subset_in(sizes: &[i64], alpha: i64, beta: i64) -> bool {
        (0_u32..1 << sizes.len()).any(|subset| {
            let sum: i64 = sizes
                .iter()
                .enumerate()
                .filter(|&(index, _)| subset & (1 << index) != 0)
                .map(|(_, &size)| size)
                .sum();
            alpha <= sum && sum <= beta
        })
    }

    #[test]
    fn reachable_window_is_not_reported() {
        assert!(has_subset_in(&SIZES, 6, 6));
        assert_eq!(no_sum(&SIZES, 6, 6), None);
    }

    #[test]
    fn gap_below_the_total_is_reported() {
        assert!(!has_subset_in(&SIZES, 11, 11));
        assert_eq!(
            no_sum(&SIZES, 11, 11),
            Some(NoSum {
                largest_below: 10,
                smallest_above: 12
            })
        );
    }

    #[test]
    fn window_below_the_smallest_item_is_reported() {
        assert_eq!(
            no_sum(&SIZES, 1, 1),
            Some(NoSum {
                largest_below: 0,
                smallest_above: 2
            })
        );
    }

    #[test]
    fn trivial_windows_are_never_reported() {
        assert_eq!(no_sum(&SIZES, 0, 5), None);
        assert_eq!(no_sum(&SIZES, 5, 12), None);
        assert_eq!(no_sum(&[], 1, 1), None);
    }

    #[test]
    fn small_sizes_complete_the_largest_ones() {
        // Subsets sum to 0..=3 or 10..=13.
        let sizes = [10, 1, 1, 1];
        assert!(!has_subset_in(&sizes, 5, 9));
        assert_eq!(
            no_sum(&sizes, 5, 9),
            Some(NoSum {
                largest_below: 3,
                smallest_above: 10
            })
        );
        assert_eq!(
            no_sum(&sizes, 12, 12),
            None,
            "10 + 1 + 1 reaches the window"
        );
    }

    #[test]
    fn reports_agree_with_enumeration() {
        let cases: [&[i64]; 4] = [&SIZES, &[10, 1, 1, 1], &[9, 7, 4, 4, 1], &[6, 6, 6, 2, 2]];
        for sizes in cases {
            let total: i64 = sizes.iter().sum();
            for alpha in -1..=total + 1 {
                for beta in alpha..=total + 1 {
                    if let Some(result) = no_sum(sizes, alpha, beta) {
                        assert!(
                            !has_subset_in(sizes, alpha, beta),
                            "[{alpha}, {beta}] is reachable from {sizes:?}"
                        );
                        assert!(result.largest_below < alpha);
                        assert!(result.smallest_above > beta);
                        assert!(!has_subset_in(sizes, result.largest_below + 1, beta));
                        assert!(!has_subset_in(sizes, alpha, result.smallest_above - 1));
                    }
                }
            }
        }
    }
}

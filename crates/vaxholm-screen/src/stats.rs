//! Cross-sectional statistics: quantiles and tie-aware ranks.

use std::cmp::Ordering;

/// Direction of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Rank 1 is the smallest value.
    Ascending,
    /// Rank 1 is the largest value.
    Descending,
}

/// Quantile `q` of `values` with linear interpolation between order statistics.
///
/// The position is `q * (n - 1)` on the sorted values. Returns `None` for an
/// empty input or a `q` outside `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    let (low, high) = (sorted[lower], sorted[upper]);
    // Written as low + delta so equal neighbours interpolate exactly.
    Some(low + (high - low) * weight)
}

/// 1-based ranks; tied values share the average of the positions they span.
pub fn average_ranks(values: &[f64], order: RankOrder) -> Vec<f64> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        let cmp = values[a].total_cmp(&values[b]);
        match order {
            RankOrder::Ascending => cmp,
            RankOrder::Descending => cmp.reverse(),
        }
    });

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < indices.len() {
        let mut end = start + 1;
        while end < indices.len()
            && values[indices[end]].total_cmp(&values[indices[start]]) == Ordering::Equal
        {
            end += 1;
        }

        // Positions start+1 ..= end share their mean.
        let shared = (start + 1 + end) as f64 / 2.0;
        for &index in &indices[start..end] {
            ranks[index] = shared;
        }
        start = end;
    }

    ranks
}

/// Ranks normalized to `rank / n * 100`, so every value lies in (0, 100].
pub fn percentile_ranks(values: &[f64], order: RankOrder) -> Vec<f64> {
    let n = values.len() as f64;
    average_ranks(values, order)
        .into_iter()
        .map(|rank| rank / n * 100.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(0.25, 1.75)]
    #[case(0.5, 2.5)]
    #[case(1.0, 4.0)]
    fn test_quantile_linear(#[case] q: f64, #[case] expected: f64) {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_relative_eq!(quantile(&values, q).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_of_uniform_spread() {
        let values: Vec<f64> = (5..=16).map(f64::from).collect();
        // position 0.3 * 11 = 3.3 between 8 and 9
        assert_relative_eq!(quantile(&values, 0.3).unwrap(), 8.3, epsilon = 1e-9);
    }

    #[test]
    fn test_quantile_of_ties_is_exact() {
        let values = [10.0; 7];
        assert_eq!(quantile(&values, 0.25), Some(10.0));
    }

    #[test]
    fn test_quantile_edge_cases() {
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[1.0], 1.5), None);
        assert_eq!(quantile(&[7.5], 0.3), Some(7.5));
    }

    #[test]
    fn test_average_ranks_ascending() {
        let ranks = average_ranks(&[30.0, 10.0, 20.0, 10.0], RankOrder::Ascending);
        assert_eq!(ranks, vec![4.0, 1.5, 3.0, 1.5]);
    }

    #[test]
    fn test_average_ranks_descending() {
        let ranks = average_ranks(&[5.0, 7.0, 7.0, 7.0, 1.0], RankOrder::Descending);
        assert_eq!(ranks, vec![4.0, 2.0, 2.0, 2.0, 5.0]);
    }

    #[test]
    fn test_percentile_ranks_bounds() {
        let values = [3.2, -1.0, 8.8, 0.0, 3.2, 12.5];
        for order in [RankOrder::Ascending, RankOrder::Descending] {
            for rank in percentile_ranks(&values, order) {
                assert!(rank > 0.0 && rank <= 100.0);
            }
        }
    }

    #[test]
    fn test_percentile_ranks_empty() {
        assert!(percentile_ranks(&[], RankOrder::Ascending).is_empty());
    }
}

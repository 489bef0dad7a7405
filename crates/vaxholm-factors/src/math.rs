//! Small numeric helpers shared by the metrics and the ranking pipeline.

/// Sample standard deviation (N - 1 denominator).
///
/// Returns `None` for fewer than two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (n - 1) as f64).sqrt())
}

/// Round to `decimals` places, ties to even.
pub fn round_dp(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_sample_std() {
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Population std is 2.0; the sample estimate scales by sqrt(8/7).
        assert_relative_eq!(std, 2.0 * (8.0f64 / 7.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sample_std_too_short() {
        assert_eq!(sample_std(&[]), None);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[rstest]
    #[case(12.345678, 2, 12.35)]
    #[case(-3.14159, 2, -3.14)]
    #[case(52.25, 1, 52.2)]
    #[case(52.35, 1, 52.4)]
    #[case(84.5, 0, 84.0)]
    #[case(85.5, 0, 86.0)]
    fn test_round_dp(#[case] value: f64, #[case] decimals: i32, #[case] expected: f64) {
        assert_relative_eq!(round_dp(value, decimals), expected);
    }
}

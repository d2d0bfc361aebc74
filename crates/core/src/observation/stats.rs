//! Shared statistics helpers for the summarization pipelines.

/// z value for a two-sided 95% interval under the normal approximation.
const Z_95: f64 = 1.96;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Zero for n < 2.
pub fn sample_stdev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// 95% confidence interval around the sample mean.
///
/// Uses the normal approximation `mean ± 1.96 * stdev / sqrt(n)`. The
/// width this loses against a t-interval at small n is acceptable for
/// field sampling and keeps the helper dependency-free. `None` for
/// n < 2, where the interval is undefined.
pub fn ci95(mean: f64, stdev: f64, n: usize) -> Option<(f64, f64)> {
    if n < 2 {
        return None;
    }
    let half_width = Z_95 * stdev / (n as f64).sqrt();
    Some((mean - half_width, mean + half_width))
}

/// Round to two decimal places (reported statistics).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place (percentages, observational means).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[10.0, 12.0, 14.0]), Some(12.0));
    }

    #[test]
    fn stdev_of_singleton_is_zero() {
        assert_eq!(sample_stdev(&[5.0]), 0.0);
        assert_eq!(sample_stdev(&[]), 0.0);
    }

    #[test]
    fn stdev_sample_denominator() {
        // [10, 12, 14]: variance = (4 + 0 + 4) / 2 = 4
        assert!((sample_stdev(&[10.0, 12.0, 14.0]) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn stdev_is_non_negative() {
        assert!(sample_stdev(&[3.0, -7.0, 1.5, 0.0]) >= 0.0);
    }

    #[test]
    fn ci95_undefined_below_two_samples() {
        assert_eq!(ci95(10.0, 0.0, 1), None);
        assert_eq!(ci95(10.0, 0.0, 0), None);
    }

    #[test]
    fn ci95_normal_approximation() {
        let (lo, hi) = ci95(12.0, 2.0, 3).unwrap();
        let half = 1.96 * 2.0 / 3f64.sqrt();
        assert!((lo - (12.0 - half)).abs() < 1e-12);
        assert!((hi - (12.0 + half)).abs() < 1e-12);
    }

    #[test]
    fn rounding() {
        assert_eq!(round2(4.4999), 4.5);
        assert_eq!(round2(1.005), 1.0); // binary representation of 1.005 sits just below
        assert_eq!(round1(66.66), 66.7);
        assert_eq!(round1(-0.04), -0.0);
    }
}

//! Utility functions for analysis module
//!
//! Shared helper functions used across analysis submodules.

use popsplit_sim::genome::Variant;

/// Calculate mean of a vector
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate sample standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mean_val = mean(values);
    let variance =
        values.iter().map(|v| (v - mean_val).powi(2)).sum::<f64>() / (values.len() - 1) as f64;

    variance.sqrt()
}

/// Cache for commonly used harmonic numbers
/// Note: harmonic_number(n) = sum_{i=1}^{n-1} 1/i
static HARMONIC_CACHE: [f64; 11] = [
    0.0,                // n=0 (unused)
    0.0,                // n=1
    1.0,                // n=2
    1.5,                // n=3
    1.8333333333333333, // n=4
    2.083333333333333,  // n=5
    2.283333333333333,  // n=6
    2.45,               // n=7
    2.5928571428571425, // n=8
    2.7178571428571425, // n=9
    2.8289682539682537, // n=10
];

/// Calculate harmonic number efficiently
#[inline]
pub fn harmonic_number(n: usize) -> f64 {
    if n < HARMONIC_CACHE.len() {
        HARMONIC_CACHE[n]
    } else {
        (1..n).map(|i| 1.0 / i as f64).sum()
    }
}

/// Sum of squared reciprocals, `sum_{i=1}^{n-1} 1/i^2`
pub fn harmonic_number_squared(n: usize) -> f64 {
    (1..n).map(|i| 1.0 / (i * i) as f64).sum()
}

/// Allele counts of a variant among `columns`, as `f64`.
#[inline]
pub fn allele_counts(variant: &Variant, columns: &[usize]) -> Vec<f64> {
    variant
        .allele_counts(columns)
        .into_iter()
        .map(|c| c as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[5.0]), 5.0);
    }

    #[test]
    fn test_std_dev() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&values);
        assert!((sd - 2.138).abs() < 0.01);
        assert_eq!(std_dev(&[1.0]), 0.0);
    }

    #[test]
    fn test_harmonic_number() {
        assert_eq!(harmonic_number(1), 0.0);
        assert!((harmonic_number(2) - 1.0).abs() < 1e-10);
        assert!((harmonic_number(4) - (1.0 + 0.5 + 1.0 / 3.0)).abs() < 1e-10);
        let direct: f64 = (1..12).map(|i| 1.0 / i as f64).sum();
        assert!((harmonic_number(12) - direct).abs() < 1e-12);
        // Cached and computed values agree
        let computed: f64 = (1..10).map(|i| 1.0 / i as f64).sum();
        assert!((harmonic_number(10) - computed).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_number_squared() {
        assert_eq!(harmonic_number_squared(1), 0.0);
        assert!((harmonic_number_squared(3) - 1.25).abs() < 1e-12);
    }
}

//! Population structure analysis
//!
//! Methods for quantifying differentiation between two sample sets.

use crate::analysis::diversity::diversity;
use crate::analysis::utils::allele_counts;
use popsplit_sim::genome::GenotypeMatrix;

/// Mean number of differences per base pair between a sample of `a` and a
/// sample of `b`.
///
/// # Formula
///
/// $$d_{ab} = \frac{1}{L} \sum_s \left(1 - \sum_k p^a_k p^b_k\right)$$
pub fn divergence(matrix: &GenotypeMatrix, a: &[usize], b: &[usize]) -> f64 {
    let length = matrix.sequence_length();
    if a.is_empty() || b.is_empty() || length == 0 {
        return 0.0;
    }
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let total: f64 = matrix
        .variants()
        .iter()
        .map(|v| {
            let shared: f64 = allele_counts(v, a)
                .iter()
                .zip(allele_counts(v, b))
                .map(|(ca, cb)| (ca / na) * (cb / nb))
                .sum();
            1.0 - shared
        })
        .sum();
    total / length as f64
}

/// Calculate FST between two sample sets
///
/// Hudson's estimator from within- and between-set diversity.
///
/// # Formula
///
/// $$F_{ST} = 1 - \frac{2(\pi_a + \pi_b)}{\pi_a + \pi_b + 2 d_{ab}}$$
///
/// # Returns
///
/// 0.0 when either set is empty or the denominator vanishes (no variation
/// at all).
///
/// # References
///
/// Hudson, R. R., Slatkin, M., & Maddison, W. P. (1992). Estimation of levels
/// of gene flow from DNA sequence data. Genetics, 132(2), 583-589.
pub fn fst(matrix: &GenotypeMatrix, a: &[usize], b: &[usize]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let within = diversity(matrix, a) + diversity(matrix, b);
    let denominator = within + 2.0 * divergence(matrix, a, b);
    if denominator <= 0.0 {
        return 0.0;
    }
    1.0 - 2.0 * within / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_utils::small_matrix;

    #[test]
    fn test_divergence_known_value() {
        let gm = small_matrix();
        // Per site: 1, 1/2, 1 -> 2.5 over 10 bp
        assert!((divergence(&gm, &[0, 1], &[2, 3]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_divergence_is_symmetric() {
        let gm = small_matrix();
        let ab = divergence(&gm, &[0, 1], &[2, 3]);
        let ba = divergence(&gm, &[2, 3], &[0, 1]);
        assert!((ab - ba).abs() < 1e-15);
    }

    #[test]
    fn test_fst_known_value() {
        let gm = small_matrix();
        // pi_a = 0.2, pi_b = 0, d_ab = 0.25 -> 1 - 0.4 / 0.7
        let f = fst(&gm, &[0, 1], &[2, 3]);
        assert!((f - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_fst_without_variation_is_zero() {
        let gm = GenotypeMatrix::new(10, vec![0, 1, 2, 3], Vec::new());
        assert_eq!(fst(&gm, &[0, 1], &[2, 3]), 0.0);
    }

    #[test]
    fn test_fst_with_empty_set_is_zero() {
        let gm = small_matrix();
        assert_eq!(fst(&gm, &[0, 1], &[]), 0.0);
        assert_eq!(fst(&gm, &[], &[2, 3]), 0.0);
    }

    #[test]
    fn test_fst_of_identical_sets_is_not_positive() {
        let gm = small_matrix();
        let cols = gm.all_columns();
        assert!(fst(&gm, &cols, &cols) <= 0.0);
    }
}

//! Diversity metrics for population genetics
//!
//! Implements standard measures of genetic diversity including:
//! - Nucleotide diversity (π)
//! - Segregating sites and Watterson's estimator (θ_W)
//! - Tajima's D

use crate::analysis::utils::{allele_counts, harmonic_number, harmonic_number_squared};
use popsplit_sim::genome::GenotypeMatrix;
use rayon::prelude::*;

/// Calculate nucleotide diversity (π) for a sample set
///
/// Mean number of pairwise differences per base pair among the samples in
/// `columns`.
///
/// # Formula
///
/// Per site, with allele counts $c_k$ among $n$ samples:
///
/// $$\pi_s = \frac{n^2 - \sum_k c_k^2}{n(n-1)}$$
///
/// summed over sites and divided by the sequence length $L$.
///
/// # Returns
///
/// 0.0 for fewer than two samples.
///
/// # References
///
/// Nei, M., & Li, W. H. (1979). Mathematical model for studying genetic
/// variation in terms of restriction endonucleases. PNAS, 76(10), 5269-5273.
pub fn diversity(matrix: &GenotypeMatrix, columns: &[usize]) -> f64 {
    let length = matrix.sequence_length();
    if length == 0 {
        return 0.0;
    }
    pairwise_differences(matrix, columns) / length as f64
}

/// Calculate the number of segregating sites
///
/// Each site contributes the number of distinct alleles present among the
/// samples minus one, so a triallelic site counts twice.
pub fn segregating_sites(matrix: &GenotypeMatrix, columns: &[usize]) -> usize {
    matrix
        .variants()
        .iter()
        .map(|v| {
            let present = v.allele_counts(columns).iter().filter(|&&c| c > 0).count();
            present.saturating_sub(1)
        })
        .sum()
}

/// Calculate Watterson's estimator (θ_W)
///
/// # Formula
///
/// $$\theta_W = \frac{S}{a_n L}$$
///
/// where $a_n = \sum_{i=1}^{n-1} \frac{1}{i}$
///
/// # References
///
/// Watterson, G. A. (1975). On the number of segregating sites in genetical
/// models without recombination. Theoretical Population Biology, 7(2), 256-276.
pub fn wattersons_theta(matrix: &GenotypeMatrix, columns: &[usize]) -> f64 {
    let n = columns.len();
    let length = matrix.sequence_length();
    if n < 2 || length == 0 {
        return 0.0;
    }
    segregating_sites(matrix, columns) as f64 / (harmonic_number(n) * length as f64)
}

/// Calculate Tajima's D statistic
///
/// Compares the total pairwise differences with the number of segregating
/// sites. Both enter un-normalised, so the value does not depend on the
/// sequence length.
///
/// # Formula
///
/// $$D = \frac{\pi - S / a_1}{\sqrt{e_1 S + e_2 S (S - 1)}}$$
///
/// # Returns
///
/// 0.0 when there are no segregating sites, fewer than two samples, or the
/// variance vanishes.
///
/// # References
///
/// Tajima, F. (1989). Statistical method for testing the neutral mutation
/// hypothesis by DNA polymorphism. Genetics, 123(3), 585-595.
pub fn tajimas_d(matrix: &GenotypeMatrix, columns: &[usize]) -> f64 {
    let n = columns.len();
    if n < 2 {
        return 0.0;
    }

    let s = segregating_sites(matrix, columns) as f64;
    if s == 0.0 {
        return 0.0;
    }
    let pi = pairwise_differences(matrix, columns);

    let n_f64 = n as f64;
    let a1 = harmonic_number(n);
    let a2 = harmonic_number_squared(n);

    let b1 = (n_f64 + 1.0) / (3.0 * (n_f64 - 1.0));
    let b2 = 2.0 * (n_f64 * n_f64 + n_f64 + 3.0) / (9.0 * n_f64 * (n_f64 - 1.0));

    let c1 = b1 - 1.0 / a1;
    let c2 = b2 - (n_f64 + 2.0) / (a1 * n_f64) + a2 / (a1 * a1);

    let e1 = c1 / a1;
    let e2 = c2 / (a1 * a1 + a2);

    let var = e1 * s + e2 * s * (s - 1.0);
    if var <= 0.0 {
        return 0.0;
    }

    (pi - s / a1) / var.sqrt()
}

/// Per-site heterozygosity summed over sites (not normalised by length).
pub(crate) fn pairwise_differences(matrix: &GenotypeMatrix, columns: &[usize]) -> f64 {
    let n = columns.len() as f64;
    if n < 2.0 {
        return 0.0;
    }
    let per_site: Vec<f64> = matrix
        .variants()
        .par_iter()
        .map(|v| {
            let sum_sq: f64 = allele_counts(v, columns).iter().map(|c| c * c).sum();
            (n * n - sum_sq) / (n * (n - 1.0))
        })
        .collect();
    // Sequential sum keeps the result independent of the thread count
    per_site.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_utils::small_matrix;

    #[test]
    fn test_diversity_known_value() {
        let gm = small_matrix();
        // 2/3 + 1/2 + 5/6 = 2 differences over 10 bp
        let pi = diversity(&gm, &gm.all_columns());
        assert!((pi - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_diversity_subset() {
        let gm = small_matrix();
        // Samples 2 and 3 are identical everywhere
        assert_eq!(diversity(&gm, &[2, 3]), 0.0);
        // Samples 0 and 1 differ at positions 4 and 8
        assert!((diversity(&gm, &[0, 1]) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_diversity_too_few_samples() {
        let gm = small_matrix();
        assert_eq!(diversity(&gm, &[0]), 0.0);
        assert_eq!(diversity(&gm, &[]), 0.0);
    }

    #[test]
    fn test_segregating_sites_counts_extra_alleles() {
        let gm = small_matrix();
        assert_eq!(segregating_sites(&gm, &gm.all_columns()), 4);
        assert_eq!(segregating_sites(&gm, &[2, 3]), 0);
        assert_eq!(segregating_sites(&gm, &[0, 2]), 2);
    }

    #[test]
    fn test_wattersons_theta() {
        let gm = small_matrix();
        let a_4 = 1.0 + 0.5 + 1.0 / 3.0;
        let theta = wattersons_theta(&gm, &gm.all_columns());
        assert!((theta - 4.0 / (a_4 * 10.0)).abs() < 1e-12);
    }

    #[test]
    fn test_tajimas_d_hand_computed() {
        let gm = small_matrix();
        let d = tajimas_d(&gm, &gm.all_columns());

        // n = 4, S = 4, pi = 2
        let (n, s, pi) = (4.0_f64, 4.0_f64, 2.0_f64);
        let a1 = 11.0 / 6.0;
        let a2 = 1.0 + 0.25 + 1.0 / 9.0;
        let b1 = (n + 1.0) / (3.0 * (n - 1.0));
        let b2 = 2.0 * (n * n + n + 3.0) / (9.0 * n * (n - 1.0));
        let c1 = b1 - 1.0 / a1;
        let c2 = b2 - (n + 2.0) / (a1 * n) + a2 / (a1 * a1);
        let var = c1 / a1 * s + c2 / (a1 * a1 + a2) * s * (s - 1.0);
        let expected = (pi - s / a1) / var.sqrt();

        assert!((d - expected).abs() < 1e-12);
        assert!((d + 0.780).abs() < 1e-3);
    }

    #[test]
    fn test_tajimas_d_undefined_cases() {
        let gm = small_matrix();
        assert_eq!(tajimas_d(&gm, &[2, 3]), 0.0);
        assert_eq!(tajimas_d(&gm, &[0]), 0.0);
        let empty = GenotypeMatrix::new(10, vec![0, 1, 2], Vec::new());
        assert_eq!(tajimas_d(&empty, &empty.all_columns()), 0.0);
    }
}

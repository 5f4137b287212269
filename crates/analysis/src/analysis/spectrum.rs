//! Allele frequency spectrum

use popsplit_sim::genome::GenotypeMatrix;

/// Site frequency spectrum of the samples in `columns`.
///
/// Returns a vector of length `n + 1` where entry `k` is the number of
/// alleles carried by exactly `k` samples.
///
/// - Polarised: only derived alleles are counted; the ancestral allele of
///   each site is ignored.
/// - Unpolarised: every allele is counted with weight ½ in bin
///   `min(k, n - k)`, so a biallelic site contributes 1 in total.
///
/// Values are site counts and are not divided by the sequence length.
///
/// # Examples
///
/// ```
/// use popsplit_analysis::allele_frequency_spectrum;
/// use popsplit_sim::base::Nucleotide;
/// use popsplit_sim::genome::{GenotypeMatrix, Variant};
///
/// let variant = Variant {
///     position: 3,
///     alleles: vec![Nucleotide::A, Nucleotide::G],
///     genotypes: vec![0, 1, 0],
/// };
/// let gm = GenotypeMatrix::new(10, vec![0, 1, 2], vec![variant]);
/// assert_eq!(allele_frequency_spectrum(&gm, &[0, 1, 2], true), vec![0.0, 1.0, 0.0, 0.0]);
/// ```
pub fn allele_frequency_spectrum(matrix: &GenotypeMatrix, columns: &[usize], polarised: bool) -> Vec<f64> {
    let n = columns.len();
    let mut afs = vec![0.0; n + 1];

    for variant in matrix.variants() {
        let counts = variant.allele_counts(columns);
        if polarised {
            for &k in counts.iter().skip(1) {
                afs[k] += 1.0;
            }
        } else {
            for &k in &counts {
                afs[k.min(n - k)] += 0.5;
            }
        }
    }
    afs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_utils::small_matrix;

    #[test]
    fn test_polarised_spectrum() {
        let gm = small_matrix();
        let afs = allele_frequency_spectrum(&gm, &gm.all_columns(), true);
        assert_eq!(afs, vec![0.0, 2.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unpolarised_spectrum() {
        let gm = small_matrix();
        let afs = allele_frequency_spectrum(&gm, &gm.all_columns(), false);
        assert_eq!(afs, vec![0.0, 2.0, 1.5, 0.0, 0.0]);
    }

    #[test]
    fn test_spectrum_length_follows_sample_set() {
        let gm = small_matrix();
        let afs = allele_frequency_spectrum(&gm, &[0, 1], true);
        assert_eq!(afs.len(), 3);
        // Derived alleles absent from the set land in bin 0
        assert_eq!(afs, vec![2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_spectrum_without_sites() {
        let gm = GenotypeMatrix::new(10, vec![0, 1], Vec::new());
        assert_eq!(allele_frequency_spectrum(&gm, &[0, 1], true), vec![0.0; 3]);
    }
}

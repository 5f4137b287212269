//! Site-by-sample allele matrix consumed by the statistics crate.

use crate::base::Nucleotide;
use crate::genome::NodeId;

/// Alleles observed at one site.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub position: u64,
    /// Index 0 is the ancestral state
    pub alleles: Vec<Nucleotide>,
    /// One allele index per sample column
    pub genotypes: Vec<u8>,
}

impl Variant {
    /// Number of copies of each allele among the given sample columns.
    pub fn allele_counts(&self, columns: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.alleles.len()];
        for &col in columns {
            counts[self.genotypes[col] as usize] += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenotypeMatrix {
    sequence_length: u64,
    samples: Vec<NodeId>,
    variants: Vec<Variant>,
}

impl GenotypeMatrix {
    pub fn new(sequence_length: u64, samples: Vec<NodeId>, variants: Vec<Variant>) -> Self {
        Self {
            sequence_length,
            samples,
            variants,
        }
    }

    pub fn sequence_length(&self) -> u64 {
        self.sequence_length
    }

    /// Sample node id of each column.
    pub fn samples(&self) -> &[NodeId] {
        &self.samples
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn num_sites(&self) -> usize {
        self.variants.len()
    }

    /// Every column index, i.e. the set of all samples.
    pub fn all_columns(&self) -> Vec<usize> {
        (0..self.samples.len()).collect()
    }

    /// Column indices of the given sample nodes. Nodes that are not samples
    /// of this matrix are skipped.
    pub fn columns_of(&self, nodes: &[NodeId]) -> Vec<usize> {
        nodes
            .iter()
            .filter_map(|node| self.samples.iter().position(|s| s == node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allele_counts() {
        let v = Variant {
            position: 0,
            alleles: vec![Nucleotide::A, Nucleotide::T, Nucleotide::G],
            genotypes: vec![0, 1, 1, 2, 0],
        };
        assert_eq!(v.allele_counts(&[0, 1, 2, 3, 4]), vec![2, 2, 1]);
        assert_eq!(v.allele_counts(&[1, 2]), vec![0, 2, 0]);
    }

    #[test]
    fn test_columns_of() {
        let gm = GenotypeMatrix::new(10, vec![4, 5, 9], Vec::new());
        assert_eq!(gm.columns_of(&[9, 4]), vec![2, 0]);
        assert_eq!(gm.columns_of(&[7]), Vec::<usize>::new());
        assert_eq!(gm.all_columns(), vec![0, 1, 2]);
    }
}

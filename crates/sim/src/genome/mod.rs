//! Genealogies of the sampled genomes.
//!
//! This module provides the tree-sequence tables built by the ancestry
//! engine, a traversal over the local trees, and the genotype matrix that
//! the statistics operate on.

mod genotypes;
mod tree_sequence;
mod trees;

pub use genotypes::{GenotypeMatrix, Variant};
pub use tree_sequence::{Edge, Mutation, Node, NodeId, PopulationRecord, Site, TreeSequence};
pub use trees::Trees;

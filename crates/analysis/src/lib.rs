//! # Analysis Crate
//!
//! Site statistics over the genotype matrices produced by `popsplit-sim`:
//! nucleotide diversity, Watterson's theta, Tajima's D, the allele frequency
//! spectrum, divergence and Fst.

pub mod analysis;

pub use analysis::{
    allele_frequency_spectrum, divergence, diversity, fst, segregating_sites, tajimas_d,
    wattersons_theta,
};

//! # Simulation Crate
//!
//! The `sim` crate provides coalescent simulation for population-split
//! scenarios. It includes modules for declaring a demography, running the
//! ancestry engine, overlaying neutral mutations, and reading the resulting
//! tree sequence as local trees or a genotype matrix.

pub mod base;
pub mod errors;
pub mod evolution;
pub mod genome;
pub mod simulation;
pub mod prelude;

pub use base::Nucleotide;
pub use genome::TreeSequence;

//! Population genetics statistics for popsplit
//!
//! Every function takes a [`GenotypeMatrix`](popsplit_sim::genome::GenotypeMatrix)
//! and one or more sample sets, given as column indices of that matrix.
//! Per-site values are summed over sites and, where noted, divided by the
//! sequence length.

pub mod diversity;
pub mod spectrum;
pub mod structure;
pub mod utils;

// Re-export commonly used functions
pub use diversity::{diversity, segregating_sites, tajimas_d, wattersons_theta};
pub use spectrum::allele_frequency_spectrum;
pub use structure::{divergence, fst};

//! Base types shared by the simulation stages.
//!
//! This module provides the nucleotide alphabet used for site states and the
//! random number generator setup.

mod nucleotide;
pub mod rng;

pub use nucleotide::Nucleotide;
pub use rng::seeded_rng;

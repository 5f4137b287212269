//! Coalescent ancestry simulation.
//!
//! - `Demography`: populations and the split events connecting them.
//! - `AncestryConfig`: samples, genome length, recombination rate and seed.
//! - `sim_ancestry`: runs the coalescent and returns a `TreeSequence`.

pub mod demography;
pub mod engine;
pub mod lineage;
pub mod parameters;

pub use demography::{Demography, Population, PopulationId, PopulationSplit};
pub use engine::{sim_ancestry, AncestryEngine};
pub use parameters::{AncestryConfig, SampleSet};

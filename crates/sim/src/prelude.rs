//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use popsplit_sim::prelude::*;
//!
//! let demography = Demography::isolated_split([("N1", 100.0), ("N2", 100.0)], ("ANC", 100.0), 10.0).unwrap();
//! let config = AncestryConfig::new(vec![SampleSet::new("N1", 2)], 100).seed(3);
//! let ts = sim_ancestry(&demography, &config).unwrap();
//! let ts = sim_mutations(&ts, &MutationConfig::new(1e-3).seed(3)).unwrap();
//! assert_eq!(ts.genotype_matrix().num_samples(), 4);
//! ```

pub use crate::base::{seeded_rng, Nucleotide};
pub use crate::errors::{self, DemographyError, MutationError, SimulationError};
pub use crate::evolution::{sim_mutations, MutationConfig};
pub use crate::genome::{GenotypeMatrix, NodeId, PopulationRecord, TreeSequence, Variant};
pub use crate::simulation::{sim_ancestry, AncestryConfig, Demography, PopulationId, SampleSet};

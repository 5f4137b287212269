//! Shared default values for sweep configuration.
//! These values are used by the `init` and `simulate` commands (via clap).

pub const CONFIG_FILE: &str = "sweep.json";
pub const RESULTS_FILE: &str = "results.csv";

// Population sizes (diploid individuals)
pub const N1_SIZE: f64 = 90_000.0;
pub const N2_SIZE: f64 = 3_000.0;
pub const ANCESTRAL_SIZE: f64 = 7_000_000.0;

// Generations before present
pub const SPLIT_TIME: f64 = 6_000.0;
pub const SPLIT_TIMES: [f64; 2] = [5_000.0, 6_000.0];

pub const SEQUENCE_LENGTH: u64 = 1_000;
pub const RECOMBINATION_RATE: f64 = 3.5e-9;
pub const MUTATION_RATE: f64 = 3.5e-9;

// Sampled individuals per derived population
pub const N1_SAMPLES: usize = 50;
pub const N2_SAMPLES: usize = 50;

pub const REPLICATES: usize = 1;
pub const SEED: u64 = 1234;

pub const LOG_FILTER: &str = "warn";

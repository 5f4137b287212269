//! # Sweep Crate
//!
//! Runs replicated population-split simulations over a set of parameter
//! combinations and collects one row of summary statistics per replicate.
//!
//! The runner talks to the simulator only through the [`Simulator`] and
//! [`Replicate`] traits; [`CoalescentSimulator`] is the built-in backend.

pub mod backend;
pub mod errors;
pub mod output;
pub mod params;
pub mod runner;
pub mod scenario;
pub mod simulator;

pub use backend::{CoalescentSimulator, TreeReplicate};
pub use errors::{ReplicateError, SimulatorError, SweepError};
pub use output::{write_results, OutputFormat, ResultRow, CSV_HEADER};
pub use params::{SplitParameters, StatisticsConfig, SweepConfig};
pub use runner::{derive_seed, run_replicate, run_sweep, summarize, CombinationSummary, SweepRunner};
pub use scenario::{DemographicScenario, SimulationRequest};
pub use simulator::{Replicate, SampleId, Simulator, StatisticBundle};

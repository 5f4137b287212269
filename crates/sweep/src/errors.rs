//! Error types for sweeps.

use popsplit_sim::errors::{DemographyError, MutationError, SimulationError};
use thiserror::Error;

/// Failure reported by a [`Simulator`](crate::simulator::Simulator).
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("Invalid demography: {0}")]
    Demography(#[from] DemographyError),
    #[error("Ancestry simulation failed: {0}")]
    Ancestry(#[from] SimulationError),
    #[error("Mutation simulation failed: {0}")]
    Mutation(#[from] MutationError),
    #[error("Simulator error: {0}")]
    Other(String),
}

/// Failure of a single replicate.
#[derive(Debug, Error)]
pub enum ReplicateError {
    /// Demographic parameters violate a scenario invariant
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
    /// A sample set refers to a population the replicate does not know
    #[error("Unknown population '{0}'")]
    UnknownPopulation(String),
    /// A statistic needs samples from a population that has none
    #[error("No samples in population '{0}'")]
    EmptySampleSet(String),
    #[error(transparent)]
    SimulatorFailure(#[from] SimulatorError),
}

/// Error type for sweep operations.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Invalid sweep configuration: {0}")]
    InvalidConfig(String),
    /// The sweep stops at the first failing replicate
    #[error("Combination {combination}, replicate {replicate}: {source}")]
    Replicate {
        combination: usize,
        replicate: usize,
        source: ReplicateError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replicate_error_names_indices() {
        let err = SweepError::Replicate {
            combination: 2,
            replicate: 5,
            source: ReplicateError::UnknownPopulation("N3".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("Combination 2"));
        assert!(msg.contains("replicate 5"));
        assert!(msg.contains("'N3'"));
    }

    #[test]
    fn test_simulator_failure_wraps_source() {
        let err = ReplicateError::from(SimulatorError::from(SimulationError::NoSamples));
        assert!(matches!(err, ReplicateError::SimulatorFailure(_)));
        assert!(err.to_string().contains("Ancestry simulation failed"));
    }
}

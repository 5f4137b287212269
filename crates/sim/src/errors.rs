use std::error;
use std::fmt;

/// Errors raised while declaring populations and demographic events.
#[derive(Debug, Clone, PartialEq)]
pub enum DemographyError {
    /// Population name is empty
    EmptyName,
    /// A population with this name was already declared
    DuplicatePopulation(String),
    /// Initial size must be finite and strictly positive
    InvalidSize { name: String, size: f64 },
    /// Referenced population was never declared
    UnknownPopulation(String),
    /// Split time must be finite and non-negative
    InvalidTime(f64),
    /// A split needs at least one derived population
    NoDerivedPopulations,
    /// The ancestral population is also listed as derived
    SelfSplit(String),
}

impl fmt::Display for DemographyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Population name must not be empty"),
            Self::DuplicatePopulation(name) => {
                write!(f, "Population '{name}' is already declared")
            }
            Self::InvalidSize { name, size } => {
                write!(
                    f,
                    "Invalid initial size for population '{name}': {size} (must be > 0)"
                )
            }
            Self::UnknownPopulation(name) => write!(f, "Unknown population '{name}'"),
            Self::InvalidTime(t) => {
                write!(f, "Invalid event time: {t} (must be finite and >= 0)")
            }
            Self::NoDerivedPopulations => {
                write!(f, "Population split requires at least one derived population")
            }
            Self::SelfSplit(name) => {
                write!(f, "Population '{name}' cannot be ancestral to itself")
            }
        }
    }
}

impl error::Error for DemographyError {}

/// Errors that can occur while simulating ancestry.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// An invalid parameter value was provided
    InvalidParameter(String),
    /// Samples requested from a population that does not exist
    UnknownPopulation(String),
    /// Samples requested from a population that is not active at time zero
    InactivePopulation(String),
    /// No samples were requested
    NoSamples,
    /// Lineages remain but no event can ever bring them together
    InfiniteWaitingTime { time: f64, lineages: usize },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
            Self::UnknownPopulation(name) => {
                write!(f, "Cannot sample from unknown population '{name}'")
            }
            Self::InactivePopulation(name) => {
                write!(
                    f,
                    "Cannot sample from population '{name}': it is not active at time zero"
                )
            }
            Self::NoSamples => write!(f, "At least one sample is required"),
            Self::InfiniteWaitingTime { time, lineages } => {
                write!(
                    f,
                    "Infinite waiting time at t={time}: {lineages} lineages can never coalesce"
                )
            }
        }
    }
}

impl error::Error for SimulationError {}

/// Errors that can occur during mutation operations.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationError {
    /// Mutation rate must be finite and non-negative
    InvalidMutationRate(f64),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::InvalidMutationRate(mu) => {
                write!(
                    f,
                    "Invalid mutation rate: {mu} (must be finite and non-negative)"
                )
            }
        }
    }
}

impl error::Error for MutationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demography_error_messages() {
        let err = DemographyError::InvalidSize {
            name: "N1".into(),
            size: 0.0,
        };
        assert!(err.to_string().contains("N1"));
        assert!(DemographyError::UnknownPopulation("X".into())
            .to_string()
            .contains("'X'"));
    }

    #[test]
    fn test_simulation_error_messages() {
        let err = SimulationError::InactivePopulation("ANC".into());
        assert!(err.to_string().contains("not active"));
        let err = SimulationError::InfiniteWaitingTime {
            time: 1.5,
            lineages: 2,
        };
        assert!(err.to_string().contains("2 lineages"));
    }
}

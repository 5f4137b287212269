//! Ancestry simulation parameters.

use crate::errors::SimulationError;
use serde::{Deserialize, Serialize};

/// Number of individuals sampled from one population at time zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSet {
    pub population: String,
    pub num_individuals: usize,
}

impl SampleSet {
    pub fn new(population: impl Into<String>, num_individuals: usize) -> Self {
        Self {
            population: population.into(),
            num_individuals,
        }
    }
}

/// Parameters of one ancestry simulation.
///
/// # Examples
///
/// ```
/// use popsplit_sim::simulation::{AncestryConfig, SampleSet};
///
/// let config = AncestryConfig::new(vec![SampleSet::new("N1", 50), SampleSet::new("N2", 50)], 1_000)
///     .recombination_rate(3.5e-9)
///     .seed(1234);
/// assert_eq!(config.num_sample_nodes(), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestryConfig {
    pub samples: Vec<SampleSet>,
    /// Genome length in base pairs; breakpoints fall on integer positions
    pub sequence_length: u64,
    /// Per base pair, per generation
    pub recombination_rate: f64,
    /// Genomes per individual
    pub ploidy: usize,
    /// Optional RNG seed for reproducibility
    pub seed: Option<u64>,
}

impl AncestryConfig {
    /// Diploid samples, no recombination, entropy-seeded.
    pub fn new(samples: Vec<SampleSet>, sequence_length: u64) -> Self {
        Self {
            samples,
            sequence_length,
            recombination_rate: 0.0,
            ploidy: 2,
            seed: None,
        }
    }

    pub fn recombination_rate(mut self, rate: f64) -> Self {
        self.recombination_rate = rate;
        self
    }

    pub fn ploidy(mut self, ploidy: usize) -> Self {
        self.ploidy = ploidy;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Total number of sampled genomes.
    pub fn num_sample_nodes(&self) -> usize {
        self.samples
            .iter()
            .map(|s| s.num_individuals * self.ploidy)
            .sum()
    }

    /// Check parameter ranges. Population names are checked against the
    /// demography by the engine.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.sequence_length == 0 {
            return Err(SimulationError::InvalidParameter(
                "sequence_length must be > 0".into(),
            ));
        }
        if !self.recombination_rate.is_finite() || self.recombination_rate < 0.0 {
            return Err(SimulationError::InvalidParameter(format!(
                "recombination_rate must be finite and >= 0, got {}",
                self.recombination_rate
            )));
        }
        if self.ploidy == 0 {
            return Err(SimulationError::InvalidParameter("ploidy must be >= 1".into()));
        }
        if self.num_sample_nodes() == 0 {
            return Err(SimulationError::NoSamples);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AncestryConfig {
        AncestryConfig::new(vec![SampleSet::new("A", 3)], 100)
    }

    #[test]
    fn test_defaults() {
        let c = base();
        assert_eq!(c.ploidy, 2);
        assert_eq!(c.recombination_rate, 0.0);
        assert_eq!(c.seed, None);
        assert_eq!(c.num_sample_nodes(), 6);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AncestryConfig::new(vec![SampleSet::new("A", 3)], 0)
            .validate()
            .is_err());
        assert!(base().recombination_rate(-1.0).validate().is_err());
        assert!(base().recombination_rate(f64::INFINITY).validate().is_err());
        assert!(base().ploidy(0).validate().is_err());
        assert_eq!(
            AncestryConfig::new(vec![SampleSet::new("A", 0)], 10).validate(),
            Err(SimulationError::NoSamples)
        );
    }
}

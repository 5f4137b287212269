//! Demographic scenarios and the simulation requests built from them.

use crate::errors::ReplicateError;
use crate::params::SplitParameters;
use popsplit_sim::errors::DemographyError;
use popsplit_sim::simulation::{AncestryConfig, Demography, SampleSet};
use serde::{Deserialize, Serialize};

/// Names of the two derived populations of a split scenario.
pub const DERIVED_POPULATIONS: [&str; 2] = ["N1", "N2"];
/// Name of the ancestral population of a split scenario.
pub const ANCESTRAL_POPULATION: &str = "ANC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSpec {
    pub name: String,
    pub initial_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitEvent {
    /// Generations before present
    pub time: f64,
    pub derived: Vec<String>,
    pub ancestral: String,
}

/// Named populations and the split joining them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicScenario {
    pub populations: Vec<PopulationSpec>,
    pub split: SplitEvent,
}

impl DemographicScenario {
    /// `N1` and `N2` splitting from `ANC` with the sizes and time of `params`.
    pub fn from_parameters(params: &SplitParameters) -> Self {
        let population = |name: &str, initial_size: f64| PopulationSpec {
            name: name.to_string(),
            initial_size,
        };
        Self {
            populations: vec![
                population(DERIVED_POPULATIONS[0], params.n1_size),
                population(DERIVED_POPULATIONS[1], params.n2_size),
                population(ANCESTRAL_POPULATION, params.ancestral_size),
            ],
            split: SplitEvent {
                time: params.split_time,
                derived: DERIVED_POPULATIONS.iter().map(|s| s.to_string()).collect(),
                ancestral: ANCESTRAL_POPULATION.to_string(),
            },
        }
    }

    /// Build the simulator demography. Fails on any scenario invariant.
    pub fn demography(&self) -> Result<Demography, DemographyError> {
        let mut demography = Demography::new();
        for pop in &self.populations {
            demography.add_population(&pop.name, pop.initial_size)?;
        }
        let derived: Vec<&str> = self.split.derived.iter().map(String::as_str).collect();
        demography.add_population_split(self.split.time, &derived, &self.split.ancestral)?;
        Ok(demography)
    }

    pub fn validate(&self) -> Result<(), ReplicateError> {
        self.demography()
            .map(|_| ())
            .map_err(|e| ReplicateError::InvalidScenario(e.to_string()))
    }

    pub fn declares(&self, name: &str) -> bool {
        self.populations.iter().any(|p| p.name == name)
    }
}

/// Everything a simulator needs for one replicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub scenario: DemographicScenario,
    /// (population name, individuals)
    pub samples: Vec<(String, usize)>,
    pub sequence_length: u64,
    pub recombination_rate: f64,
    pub mutation_rate: f64,
    pub seed: Option<u64>,
    /// Genomes per sampled individual
    pub ploidy: usize,
}

impl SimulationRequest {
    pub fn from_parameters(params: &SplitParameters, seed: Option<u64>) -> Self {
        Self {
            scenario: DemographicScenario::from_parameters(params),
            samples: vec![
                (DERIVED_POPULATIONS[0].to_string(), params.n1_samples),
                (DERIVED_POPULATIONS[1].to_string(), params.n2_samples),
            ],
            sequence_length: params.sequence_length,
            recombination_rate: params.recombination_rate,
            mutation_rate: params.mutation_rate,
            seed,
            ploidy: 2,
        }
    }

    /// Check the scenario and the request's own ranges.
    pub fn validate(&self) -> Result<(), ReplicateError> {
        self.scenario.validate()?;
        if let Some((name, _)) = self.samples.iter().find(|(name, _)| !self.scenario.declares(name)) {
            return Err(ReplicateError::InvalidScenario(format!(
                "samples requested from undeclared population '{name}'"
            )));
        }
        if let Some((name, _)) = self.samples.iter().find(|(_, n)| *n == 0) {
            return Err(ReplicateError::InvalidScenario(format!(
                "no individuals sampled from '{name}'"
            )));
        }
        if self.sequence_length == 0 {
            return Err(ReplicateError::InvalidScenario(
                "sequence length must be > 0".into(),
            ));
        }
        for (what, rate) in [
            ("recombination", self.recombination_rate),
            ("mutation", self.mutation_rate),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ReplicateError::InvalidScenario(format!(
                    "{what} rate must be finite and >= 0, got {rate}"
                )));
            }
        }
        Ok(())
    }

    /// Ancestry parameters for the coalescent engine.
    pub fn ancestry_config(&self) -> AncestryConfig {
        let samples = self
            .samples
            .iter()
            .map(|(name, n)| SampleSet::new(name.as_str(), *n))
            .collect();
        AncestryConfig::new(samples, self.sequence_length)
            .recombination_rate(self.recombination_rate)
            .ploidy(self.ploidy)
            .maybe_seed(self.seed)
    }
}

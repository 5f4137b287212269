//! Sweep configuration: parameter combinations, replicate count and seeding.
//!
//! A [`SweepConfig`] can be written to and read from a JSON file so that a
//! sweep can be set up once and re-run later.

use crate::errors::SweepError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One parameter combination of a two-population split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitParameters {
    /// Size of derived population `N1` (diploid individuals)
    pub n1_size: f64,
    /// Size of derived population `N2`
    pub n2_size: f64,
    /// Size of the ancestral population `ANC`
    pub ancestral_size: f64,
    /// Generations before present
    pub split_time: f64,
    /// Base pairs
    pub sequence_length: u64,
    /// Per base pair, per generation
    pub recombination_rate: f64,
    /// Per base pair, per generation
    pub mutation_rate: f64,
    /// Individuals sampled from `N1`
    pub n1_samples: usize,
    /// Individuals sampled from `N2`
    pub n2_samples: usize,
}

impl Default for SplitParameters {
    fn default() -> Self {
        Self {
            n1_size: 90_000.0,
            n2_size: 3_000.0,
            ancestral_size: 7_000_000.0,
            split_time: 6_000.0,
            sequence_length: 1_000,
            recombination_rate: 3.5e-9,
            mutation_rate: 3.5e-9,
            n1_samples: 50,
            n2_samples: 50,
        }
    }
}

impl SplitParameters {
    /// Copy with a different split time.
    pub fn with_split_time(&self, split_time: f64) -> Self {
        Self {
            split_time,
            ..self.clone()
        }
    }
}

/// Which statistics to extract and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Population names whose samples form the two Fst sample sets
    #[serde(default = "default_fst_populations")]
    pub fst_populations: [String; 2],
    /// Count only derived alleles in the frequency spectrum
    #[serde(default = "default_polarised")]
    pub polarised: bool,
}

fn default_fst_populations() -> [String; 2] {
    ["N1".to_string(), "N2".to_string()]
}

fn default_polarised() -> bool {
    true
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            fst_populations: default_fst_populations(),
            polarised: default_polarised(),
        }
    }
}

/// A full sweep: every combination is simulated `replicates` times.
///
/// # Examples
///
/// ```
/// use popsplit_sweep::params::{SplitParameters, SweepConfig};
///
/// let config = SweepConfig::split_time_sweep(&SplitParameters::default(), &[5000.0, 6000.0], 3)
///     .base_seed(1234);
/// assert_eq!(config.num_rows(), 6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub combinations: Vec<SplitParameters>,
    pub replicates: usize,
    /// When set, every replicate's seed is derived from it
    #[serde(default)]
    pub base_seed: Option<u64>,
    #[serde(default)]
    pub statistics: StatisticsConfig,
    /// Run replicates on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

impl SweepConfig {
    pub fn new(combinations: Vec<SplitParameters>, replicates: usize) -> Self {
        Self {
            combinations,
            replicates,
            base_seed: None,
            statistics: StatisticsConfig::default(),
            parallel: false,
        }
    }

    /// One combination per split time, all other parameters taken from `base`.
    pub fn split_time_sweep(base: &SplitParameters, split_times: &[f64], replicates: usize) -> Self {
        let combinations = split_times
            .iter()
            .map(|&t| base.with_split_time(t))
            .collect();
        Self::new(combinations, replicates)
    }

    pub fn base_seed(mut self, seed: u64) -> Self {
        self.base_seed = Some(seed);
        self
    }

    pub fn maybe_base_seed(mut self, seed: Option<u64>) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn statistics(mut self, statistics: StatisticsConfig) -> Self {
        self.statistics = statistics;
        self
    }

    /// Number of result rows the sweep produces.
    pub fn num_rows(&self) -> usize {
        self.combinations.len() * self.replicates
    }

    /// Check the sweep shape. Demographic parameters are checked per
    /// replicate when the scenario is built.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.combinations.is_empty() {
            return Err(SweepError::InvalidConfig(
                "at least one parameter combination is required".into(),
            ));
        }
        if self.replicates == 0 {
            return Err(SweepError::InvalidConfig("replicates must be > 0".into()));
        }
        Ok(())
    }

    /// Read and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SweepError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SweepError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

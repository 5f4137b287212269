//! The seam between the sweep runner and a coalescent simulator.
//!
//! The runner never looks inside a replicate: it asks the [`Simulator`] for
//! ancestry and mutations, then reads statistics through [`Replicate`].

use crate::errors::{ReplicateError, SimulatorError};
use crate::params::StatisticsConfig;
use crate::scenario::SimulationRequest;
use popsplit_sim::genome::PopulationRecord;
use popsplit_sim::simulation::PopulationId;
use serde::{Deserialize, Serialize};

/// Identifier of one sampled genome within a replicate.
pub type SampleId = usize;

/// Statistics exposed by a simulated replicate.
pub trait Replicate {
    /// Nucleotide diversity over all samples.
    fn diversity(&self) -> f64;
    /// Tajima's D over all samples.
    fn tajimas_d(&self) -> f64;
    /// Allele frequency spectrum over all samples, length `n + 1`.
    fn allele_frequency_spectrum(&self, polarised: bool) -> Vec<f64>;
    /// Fst between two sample sets.
    fn fst(&self, sample_sets: [&[SampleId]; 2]) -> f64;
    /// Population table of the replicate.
    fn populations(&self) -> Vec<PopulationRecord>;
    /// Sample ids belonging to a population.
    fn samples(&self, population: PopulationId) -> Vec<SampleId>;
}

/// A coalescent simulator.
pub trait Simulator: Send + Sync {
    type Replicate: Replicate;

    fn simulate_ancestry(&self, request: &SimulationRequest) -> Result<Self::Replicate, SimulatorError>;

    /// Overlay mutations on `replicate`.
    fn simulate_mutations(
        &self,
        replicate: Self::Replicate,
        rate: f64,
        seed: Option<u64>,
    ) -> Result<Self::Replicate, SimulatorError>;
}

/// Summary statistics of one replicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticBundle {
    pub diversity: f64,
    pub tajimas_d: f64,
    pub allele_frequency_spectrum: Vec<f64>,
    pub fst: f64,
}

impl StatisticBundle {
    /// Read every statistic from `replicate`. Fst sample sets are resolved by
    /// population name.
    pub fn extract<R: Replicate>(replicate: &R, config: &StatisticsConfig) -> Result<Self, ReplicateError> {
        let populations = replicate.populations();
        let mut sample_sets = Vec::with_capacity(2);
        for name in &config.fst_populations {
            let id = populations
                .iter()
                .find(|p| &p.name == name)
                .map(|p| p.id)
                .ok_or_else(|| ReplicateError::UnknownPopulation(name.clone()))?;
            let samples = replicate.samples(id);
            if samples.is_empty() {
                return Err(ReplicateError::EmptySampleSet(name.clone()));
            }
            sample_sets.push(samples);
        }

        Ok(Self {
            diversity: replicate.diversity(),
            tajimas_d: replicate.tajimas_d(),
            allele_frequency_spectrum: replicate.allele_frequency_spectrum(config.polarised),
            fst: replicate.fst([&sample_sets[0], &sample_sets[1]]),
        })
    }

    /// All scalar statistics are finite and the spectrum has no NaN entries.
    pub fn is_finite(&self) -> bool {
        self.diversity.is_finite()
            && self.tajimas_d.is_finite()
            && self.fst.is_finite()
            && self.allele_frequency_spectrum.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replicate with fixed answers and two populations of two samples.
    struct FixedReplicate;

    impl Replicate for FixedReplicate {
        fn diversity(&self) -> f64 {
            0.5
        }
        fn tajimas_d(&self) -> f64 {
            -1.0
        }
        fn allele_frequency_spectrum(&self, polarised: bool) -> Vec<f64> {
            if polarised {
                vec![0.0, 2.0, 1.0]
            } else {
                vec![0.0, 3.0, 0.0]
            }
        }
        fn fst(&self, sample_sets: [&[SampleId]; 2]) -> f64 {
            (sample_sets[0].len() * 10 + sample_sets[1].len()) as f64
        }
        fn populations(&self) -> Vec<PopulationRecord> {
            vec![
                PopulationRecord {
                    id: 0,
                    name: "N1".into(),
                },
                PopulationRecord {
                    id: 1,
                    name: "N2".into(),
                },
                PopulationRecord {
                    id: 2,
                    name: "ANC".into(),
                },
            ]
        }
        fn samples(&self, population: PopulationId) -> Vec<SampleId> {
            match population {
                0 => vec![0, 1, 2],
                1 => vec![3],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn test_extract_resolves_populations_by_name() {
        let bundle = StatisticBundle::extract(&FixedReplicate, &StatisticsConfig::default()).unwrap();
        assert_eq!(bundle.diversity, 0.5);
        assert_eq!(bundle.tajimas_d, -1.0);
        assert_eq!(bundle.allele_frequency_spectrum, vec![0.0, 2.0, 1.0]);
        assert_eq!(bundle.fst, 31.0);
        assert!(bundle.is_finite());
    }

    #[test]
    fn test_extract_respects_configuration() {
        let config = StatisticsConfig {
            fst_populations: ["N2".into(), "N1".into()],
            polarised: false,
        };
        let bundle = StatisticBundle::extract(&FixedReplicate, &config).unwrap();
        assert_eq!(bundle.allele_frequency_spectrum, vec![0.0, 3.0, 0.0]);
        assert_eq!(bundle.fst, 13.0);
    }

    #[test]
    fn test_extract_unknown_population() {
        let config = StatisticsConfig {
            fst_populations: ["N1".into(), "N3".into()],
            polarised: true,
        };
        let err = StatisticBundle::extract(&FixedReplicate, &config).unwrap_err();
        assert!(matches!(err, ReplicateError::UnknownPopulation(name) if name == "N3"));
    }

    #[test]
    fn test_extract_rejects_population_without_samples() {
        let config = StatisticsConfig {
            fst_populations: ["N1".into(), "ANC".into()],
            polarised: true,
        };
        let err = StatisticBundle::extract(&FixedReplicate, &config).unwrap_err();
        assert!(matches!(err, ReplicateError::EmptySampleSet(name) if name == "ANC"));
    }
}

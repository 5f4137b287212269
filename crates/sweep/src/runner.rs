//! The sweep runner.
//!
//! For every parameter combination and replicate: build and validate the
//! scenario, simulate ancestry, overlay mutations, extract statistics and
//! append a [`ResultRow`]. Rows always come back in (combination,
//! replicate) order, in parallel mode too.

use crate::errors::{ReplicateError, SweepError};
use crate::output::ResultRow;
use crate::params::{SplitParameters, StatisticsConfig, SweepConfig};
use crate::scenario::SimulationRequest;
use crate::simulator::{Simulator, StatisticBundle};
use popsplit_analysis::analysis::utils::{mean, std_dev};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Callback invoked after each finished replicate.
pub type ReplicateCallback<'a> = Box<dyn Fn(&ResultRow) + Send + Sync + 'a>;

/// Run every replicate of `config` with `simulator`.
///
/// # Examples
///
/// ```
/// use popsplit_sweep::{run_sweep, CoalescentSimulator, SplitParameters, SweepConfig};
///
/// let params = SplitParameters { n1_samples: 5, n2_samples: 5, ..SplitParameters::default() };
/// let config = SweepConfig::new(vec![params], 2).base_seed(1234);
/// let rows = run_sweep(&config, &CoalescentSimulator::new()).unwrap();
/// assert_eq!(rows.len(), 2);
/// ```
pub fn run_sweep<S: Simulator>(config: &SweepConfig, simulator: &S) -> Result<Vec<ResultRow>, SweepError> {
    SweepRunner::new(config, simulator).run()
}

/// Seed of replicate `replicate` of combination `combination`.
///
/// A SplitMix64 mix of the three inputs, so any single replicate can be
/// re-run without running the ones before it.
pub fn derive_seed(base_seed: u64, combination: usize, replicate: usize) -> u64 {
    let z = splitmix64(base_seed);
    let z = splitmix64(z ^ combination as u64);
    splitmix64(z ^ replicate as u64)
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Simulate one replicate and extract its statistics. Ancestry and
/// mutations share `seed`.
pub fn run_replicate<S: Simulator>(
    simulator: &S,
    params: &SplitParameters,
    seed: u64,
    statistics: &StatisticsConfig,
) -> Result<StatisticBundle, ReplicateError> {
    let request = SimulationRequest::from_parameters(params, Some(seed));
    request.validate()?;

    let replicate = simulator.simulate_ancestry(&request)?;
    let replicate = simulator.simulate_mutations(replicate, request.mutation_rate, request.seed)?;
    StatisticBundle::extract(&replicate, statistics)
}

/// Sweep runner with an optional per-replicate progress callback.
pub struct SweepRunner<'a, S: Simulator> {
    config: &'a SweepConfig,
    simulator: &'a S,
    on_replicate: Option<ReplicateCallback<'a>>,
}

impl<'a, S: Simulator> SweepRunner<'a, S> {
    pub fn new(config: &'a SweepConfig, simulator: &'a S) -> Self {
        Self {
            config,
            simulator,
            on_replicate: None,
        }
    }

    /// Called once per finished row. In parallel mode calls arrive in
    /// completion order.
    pub fn on_replicate(mut self, callback: impl Fn(&ResultRow) + Send + Sync + 'a) -> Self {
        self.on_replicate = Some(Box::new(callback));
        self
    }

    /// Run the sweep. The first failing replicate aborts it.
    pub fn run(&self) -> Result<Vec<ResultRow>, SweepError> {
        self.config.validate()?;
        info!(
            combinations = self.config.combinations.len(),
            replicates = self.config.replicates,
            seeded = self.config.base_seed.is_some(),
            parallel = self.config.parallel,
            "starting sweep"
        );

        let replicates = self.config.replicates;
        let jobs: Vec<(usize, usize)> = (0..self.config.combinations.len())
            .flat_map(|c| (0..replicates).map(move |r| (c, r)))
            .collect();

        let rows = if self.config.parallel {
            jobs.par_iter()
                .map(|&(c, r)| self.run_one(c, r))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            jobs.iter()
                .map(|&(c, r)| self.run_one(c, r))
                .collect::<Result<Vec<_>, _>>()?
        };

        info!(rows = rows.len(), "sweep finished");
        Ok(rows)
    }

    fn run_one(&self, combination: usize, replicate: usize) -> Result<ResultRow, SweepError> {
        let params = &self.config.combinations[combination];
        let seed = match self.config.base_seed {
            Some(base) => derive_seed(base, combination, replicate),
            None => rand::rng().random(),
        };

        let statistics = run_replicate(self.simulator, params, seed, &self.config.statistics)
            .map_err(|source| SweepError::Replicate {
                combination,
                replicate,
                source,
            })?;
        debug!(
            combination,
            replicate,
            seed,
            diversity = statistics.diversity,
            tajimas_d = statistics.tajimas_d,
            fst = statistics.fst,
            "replicate finished"
        );

        let row = ResultRow {
            combination,
            replicate,
            seed,
            parameters: params.clone(),
            statistics,
        };
        if let Some(callback) = &self.on_replicate {
            callback(&row);
        }
        Ok(row)
    }
}

/// Mean and standard deviation of one statistic across replicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    fn of(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std_dev: std_dev(values),
        }
    }
}

/// Replicate statistics of one combination, aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationSummary {
    pub combination: usize,
    pub parameters: SplitParameters,
    pub replicates: usize,
    pub diversity: Summary,
    pub tajimas_d: Summary,
    pub fst: Summary,
    /// Entry-wise mean of the spectra
    pub mean_allele_frequency_spectrum: Vec<f64>,
}

/// Aggregate consecutive rows of the same combination, as returned by the
/// runner.
pub fn summarize(rows: &[ResultRow]) -> Vec<CombinationSummary> {
    rows.chunk_by(|a, b| a.combination == b.combination)
        .map(|members| {
            let combination = members[0].combination;
            let column = |f: fn(&StatisticBundle) -> f64| -> Vec<f64> {
                members.iter().map(|r| f(&r.statistics)).collect()
            };
            let width = members
                .iter()
                .map(|r| r.statistics.allele_frequency_spectrum.len())
                .max()
                .unwrap_or(0);
            let mut spectrum = vec![0.0; width];
            for row in members {
                for (acc, v) in spectrum.iter_mut().zip(&row.statistics.allele_frequency_spectrum) {
                    *acc += v;
                }
            }
            spectrum.iter_mut().for_each(|v| *v /= members.len() as f64);

            CombinationSummary {
                combination,
                parameters: members[0].parameters.clone(),
                replicates: members.len(),
                diversity: Summary::of(&column(|s| s.diversity)),
                tajimas_d: Summary::of(&column(|s| s.tajimas_d)),
                fst: Summary::of(&column(|s| s.fst)),
                mean_allele_frequency_spectrum: spectrum,
            }
        })
        .collect()
}

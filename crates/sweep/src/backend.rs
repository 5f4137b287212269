//! Built-in simulator backed by the `popsplit-sim` coalescent engine and the
//! `popsplit-analysis` statistics.

use crate::errors::SimulatorError;
use crate::scenario::SimulationRequest;
use crate::simulator::{Replicate, SampleId, Simulator};
use popsplit_analysis::analysis::{allele_frequency_spectrum, diversity, fst, tajimas_d};
use popsplit_sim::evolution::{sim_mutations, MutationConfig};
use popsplit_sim::genome::{GenotypeMatrix, PopulationRecord, TreeSequence};
use popsplit_sim::simulation::{sim_ancestry, PopulationId};
use tracing::debug;

/// Hudson coalescent with recombination plus a Jukes-Cantor mutation overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoalescentSimulator;

impl CoalescentSimulator {
    pub fn new() -> Self {
        Self
    }
}

impl Simulator for CoalescentSimulator {
    type Replicate = TreeReplicate;

    fn simulate_ancestry(&self, request: &SimulationRequest) -> Result<TreeReplicate, SimulatorError> {
        let demography = request.scenario.demography()?;
        let ts = sim_ancestry(&demography, &request.ancestry_config())?;
        debug!(
            nodes = ts.num_nodes(),
            trees = ts.num_trees(),
            "ancestry simulated"
        );
        Ok(TreeReplicate::new(ts))
    }

    fn simulate_mutations(
        &self,
        replicate: TreeReplicate,
        rate: f64,
        seed: Option<u64>,
    ) -> Result<TreeReplicate, SimulatorError> {
        let config = MutationConfig::new(rate).maybe_seed(seed);
        let ts = sim_mutations(&replicate.tree_sequence, &config)?;
        Ok(TreeReplicate::new(ts))
    }
}

/// A simulated tree sequence together with its genotype matrix.
#[derive(Debug, Clone)]
pub struct TreeReplicate {
    tree_sequence: TreeSequence,
    genotypes: GenotypeMatrix,
}

impl TreeReplicate {
    pub fn new(tree_sequence: TreeSequence) -> Self {
        let genotypes = tree_sequence.genotype_matrix();
        Self {
            tree_sequence,
            genotypes,
        }
    }

    pub fn tree_sequence(&self) -> &TreeSequence {
        &self.tree_sequence
    }

    pub fn genotypes(&self) -> &GenotypeMatrix {
        &self.genotypes
    }
}

impl Replicate for TreeReplicate {
    fn diversity(&self) -> f64 {
        diversity(&self.genotypes, &self.genotypes.all_columns())
    }

    fn tajimas_d(&self) -> f64 {
        tajimas_d(&self.genotypes, &self.genotypes.all_columns())
    }

    fn allele_frequency_spectrum(&self, polarised: bool) -> Vec<f64> {
        allele_frequency_spectrum(&self.genotypes, &self.genotypes.all_columns(), polarised)
    }

    fn fst(&self, sample_sets: [&[SampleId]; 2]) -> f64 {
        let a = self.genotypes.columns_of(sample_sets[0]);
        let b = self.genotypes.columns_of(sample_sets[1]);
        fst(&self.genotypes, &a, &b)
    }

    fn populations(&self) -> Vec<PopulationRecord> {
        self.tree_sequence.populations().to_vec()
    }

    fn samples(&self, population: PopulationId) -> Vec<SampleId> {
        self.tree_sequence.samples_in_population(population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SplitParameters;

    fn small_request(seed: u64) -> SimulationRequest {
        let params = SplitParameters {
            n1_size: 1_000.0,
            n2_size: 500.0,
            ancestral_size: 2_000.0,
            split_time: 300.0,
            sequence_length: 2_000,
            recombination_rate: 1e-7,
            mutation_rate: 1e-6,
            n1_samples: 5,
            n2_samples: 5,
        };
        SimulationRequest::from_parameters(&params, Some(seed))
    }

    #[test]
    fn test_ancestry_then_mutations() {
        let sim = CoalescentSimulator::new();
        let request = small_request(3);
        let rep = sim.simulate_ancestry(&request).unwrap();
        assert_eq!(rep.genotypes().num_sites(), 0);
        assert_eq!(rep.diversity(), 0.0);

        let rep = sim.simulate_mutations(rep, request.mutation_rate, request.seed).unwrap();
        assert!(rep.genotypes().num_sites() > 0);
        assert!(rep.diversity() > 0.0);
        assert_eq!(rep.allele_frequency_spectrum(true).len(), 21);
    }

    #[test]
    fn test_population_table_and_samples() {
        let sim = CoalescentSimulator::new();
        let rep = sim.simulate_ancestry(&small_request(1)).unwrap();
        let names: Vec<String> = rep.populations().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["N1", "N2", "ANC"]);
        assert_eq!(rep.samples(0), (0..10).collect::<Vec<_>>());
        assert_eq!(rep.samples(1), (10..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_fst_is_bounded() {
        let sim = CoalescentSimulator::new();
        let request = small_request(9);
        let rep = sim.simulate_ancestry(&request).unwrap();
        let rep = sim.simulate_mutations(rep, 1e-5, Some(9)).unwrap();
        let (a, b) = (rep.samples(0), rep.samples(1));
        let f = rep.fst([&a, &b]);
        assert!((-1.0..=1.0).contains(&f));
    }

    #[test]
    fn test_invalid_scenario_is_a_simulator_error() {
        let mut request = small_request(1);
        request.scenario.split.time = -5.0;
        let err = CoalescentSimulator::new().simulate_ancestry(&request).unwrap_err();
        assert!(matches!(err, SimulatorError::Demography(_)));
    }
}

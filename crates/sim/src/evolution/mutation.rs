//! Neutral mutations overlaid on a simulated genealogy.
//!
//! Mutations fall on each edge as a Poisson process with intensity
//! `rate * span * branch_length`, at a uniformly chosen integer position of
//! the edge's interval and a uniform time along the branch. Positions hit
//! more than once become a single site carrying several mutations; each
//! mutation changes the state inherited from the mutation above it (or the
//! site's ancestral state) to one of the three other nucleotides.

use crate::base::{seeded_rng, Nucleotide};
use crate::genome::{Mutation, NodeId, Site, TreeSequence};
pub use crate::errors::MutationError;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Mutation overlay parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Per base pair, per generation
    pub rate: f64,
    pub seed: Option<u64>,
}

impl MutationConfig {
    pub fn new(rate: f64) -> Self {
        Self { rate, seed: None }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), MutationError> {
        if !self.rate.is_finite() || self.rate < 0.0 {
            return Err(MutationError::InvalidMutationRate(self.rate));
        }
        Ok(())
    }
}

/// Throw mutations onto `ts` and return a copy carrying the resulting sites.
/// Any sites already present in `ts` are replaced.
///
/// # Examples
///
/// ```
/// use popsplit_sim::evolution::{sim_mutations, MutationConfig};
/// use popsplit_sim::simulation::{sim_ancestry, AncestryConfig, Demography, SampleSet};
///
/// let demography = Demography::isolated_split([("A", 500.0), ("B", 500.0)], ("C", 500.0), 100.0).unwrap();
/// let config = AncestryConfig::new(vec![SampleSet::new("A", 4), SampleSet::new("B", 4)], 10_000).seed(1);
/// let ts = sim_ancestry(&demography, &config).unwrap();
///
/// let mutated = sim_mutations(&ts, &MutationConfig::new(1e-5).seed(1)).unwrap();
/// assert!(mutated.num_sites() > 0);
/// ```
pub fn sim_mutations(ts: &TreeSequence, config: &MutationConfig) -> Result<TreeSequence, MutationError> {
    config.validate()?;
    let mut rng = seeded_rng(config.seed);

    // position -> (node, time) of every mutation hitting it
    let mut hits: BTreeMap<u64, Vec<(NodeId, f64)>> = BTreeMap::new();
    let nodes = ts.nodes();
    for edge in ts.edges() {
        let child_time = nodes[edge.child].time;
        let branch = nodes[edge.parent].time - child_time;
        let expected = config.rate * (edge.right - edge.left) as f64 * branch;
        if expected <= 0.0 {
            continue;
        }
        let count = match Poisson::new(expected) {
            Ok(p) => p.sample(&mut rng) as u64,
            Err(_) => 0,
        };
        for _ in 0..count {
            let position = rng.random_range(edge.left..edge.right);
            let time = child_time + rng.random::<f64>() * branch;
            hits.entry(position).or_default().push((edge.child, time));
        }
    }

    let mut sites = Vec::with_capacity(hits.len());
    let mut mutations: Vec<Mutation> = Vec::new();
    let mut trees = ts.trees();

    for (position, mut site_hits) in hits {
        trees.seek(position);
        let site = sites.len();
        let ancestral_state = Nucleotide::random(&mut rng);
        sites.push(Site {
            position,
            ancestral_state,
        });

        // Oldest first, so every mutation's parent is already placed
        site_hits.sort_by(|a, b| b.1.total_cmp(&a.1));
        let first = mutations.len();
        for (node, time) in site_hits {
            let parent = trees.path_to_root(node).into_iter().find_map(|u| {
                (first..mutations.len())
                    .rev()
                    .find(|&m| mutations[m].node == u)
            });
            let inherited = parent.map_or(ancestral_state, |m| mutations[m].derived_state);
            mutations.push(Mutation {
                site,
                node,
                time,
                derived_state: inherited.mutate(&mut rng),
                parent,
            });
        }
    }

    debug!(
        rate = config.rate,
        sites = sites.len(),
        mutations = mutations.len(),
        "mutations placed"
    );
    Ok(ts.with_sites(sites, mutations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::test_utils::two_tree_sequence;

    #[test]
    fn test_zero_rate_adds_no_sites() {
        let ts = two_tree_sequence();
        let out = sim_mutations(&ts, &MutationConfig::new(0.0).seed(3)).unwrap();
        assert_eq!(out.num_sites(), 0);
        assert!(out.mutations().is_empty());
        assert_eq!(out.edges(), ts.edges());
    }

    #[test]
    fn test_invalid_rate() {
        let ts = two_tree_sequence();
        assert_eq!(
            sim_mutations(&ts, &MutationConfig::new(-1.0)),
            Err(MutationError::InvalidMutationRate(-1.0))
        );
        assert!(sim_mutations(&ts, &MutationConfig::new(f64::NAN)).is_err());
    }

    #[test]
    fn test_sites_are_sorted_and_unique() {
        let ts = two_tree_sequence();
        let out = sim_mutations(&ts, &MutationConfig::new(0.5).seed(11)).unwrap();
        assert!(out.num_sites() > 0);
        for pair in out.sites().windows(2) {
            assert!(pair[0].position < pair[1].position);
        }
        assert!(out.sites().iter().all(|s| s.position < ts.sequence_length()));
    }

    #[test]
    fn test_mutations_change_inherited_state() {
        let ts = two_tree_sequence();
        let out = sim_mutations(&ts, &MutationConfig::new(2.0).seed(5)).unwrap();
        for m in out.mutations() {
            let inherited = match m.parent {
                Some(p) => {
                    let parent = &out.mutations()[p];
                    assert_eq!(parent.site, m.site);
                    assert!(parent.time >= m.time);
                    parent.derived_state
                }
                None => out.sites()[m.site].ancestral_state,
            };
            assert_ne!(m.derived_state, inherited);
        }
    }

    #[test]
    fn test_mutation_times_lie_on_their_branch() {
        let ts = two_tree_sequence();
        let out = sim_mutations(&ts, &MutationConfig::new(1.0).seed(9)).unwrap();
        for m in out.mutations() {
            assert!(m.time >= out.nodes()[m.node].time);
        }
    }

    #[test]
    fn test_existing_sites_are_replaced() {
        let ts = two_tree_sequence();
        let once = sim_mutations(&ts, &MutationConfig::new(0.5).seed(1)).unwrap();
        let twice = sim_mutations(&once, &MutationConfig::new(0.5).seed(1)).unwrap();
        assert_eq!(once, twice);
    }
}

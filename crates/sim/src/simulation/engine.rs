//! Coalescent ancestry engine.
//!
//! Implements Hudson's coalescent with recombination on a discrete genome,
//! going backwards in time from the sampled genomes until every position
//! has found its most recent common ancestor. Coalescences create tree
//! sequence nodes and edges; recombinations split a lineage's ancestral
//! material at an integer breakpoint; population splits move lineages into
//! the ancestral population.

use crate::base::seeded_rng;
use crate::errors::SimulationError;
use crate::genome::{Edge, Node, NodeId, PopulationRecord, TreeSequence};
use crate::simulation::lineage::{Lineage, OverlapCounts, Segment};
use crate::simulation::{AncestryConfig, Demography, PopulationId};
use rand::Rng;
use rand_distr::{Distribution, Exp};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::BTreeSet;
use tracing::debug;

/// Simulate the genealogy of the requested samples under `demography`.
///
/// # Examples
///
/// ```
/// use popsplit_sim::simulation::{sim_ancestry, AncestryConfig, Demography, SampleSet};
///
/// let demography = Demography::isolated_split(
///     [("N1", 1_000.0), ("N2", 500.0)],
///     ("ANC", 2_000.0),
///     400.0,
/// )
/// .unwrap();
/// let config = AncestryConfig::new(vec![SampleSet::new("N1", 5), SampleSet::new("N2", 5)], 1_000)
///     .recombination_rate(1e-7)
///     .seed(42);
///
/// let ts = sim_ancestry(&demography, &config).unwrap();
/// assert_eq!(ts.num_samples(), 20);
/// ```
pub fn sim_ancestry(
    demography: &Demography,
    config: &AncestryConfig,
) -> Result<TreeSequence, SimulationError> {
    AncestryEngine::new(demography, config)?.run()
}

/// State of one ancestry simulation.
#[derive(Debug)]
pub struct AncestryEngine<'a> {
    demography: &'a Demography,
    sequence_length: u64,
    recombination_rate: f64,
    ploidy: usize,
    lineages: Vec<Lineage>,
    overlaps: OverlapCounts,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Generations before present
    time: f64,
    /// Index of the next split event to apply
    next_split: usize,
    coalescences: usize,
    recombinations: usize,
    rng: Xoshiro256PlusPlus,
}

impl<'a> AncestryEngine<'a> {
    /// Validate the configuration and create one lineage per sampled genome.
    pub fn new(demography: &'a Demography, config: &AncestryConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let length = config.sequence_length;
        let mut nodes = Vec::with_capacity(config.num_sample_nodes() * 2);
        let mut lineages = Vec::with_capacity(config.num_sample_nodes());

        for set in &config.samples {
            let population = demography
                .population_id(&set.population)
                .ok_or_else(|| SimulationError::UnknownPopulation(set.population.clone()))?;
            if set.num_individuals > 0 && !demography.populations()[population].initially_active {
                return Err(SimulationError::InactivePopulation(set.population.clone()));
            }
            for _ in 0..set.num_individuals * config.ploidy {
                let node = nodes.len();
                nodes.push(Node {
                    time: 0.0,
                    population,
                    is_sample: true,
                });
                lineages.push(Lineage::new(
                    population,
                    vec![Segment {
                        left: 0,
                        right: length,
                        node,
                    }],
                ));
            }
        }

        let num_samples = nodes.len();
        if num_samples < 2 {
            // A single genome is its own common ancestor
            lineages.clear();
        }

        Ok(Self {
            demography,
            sequence_length: length,
            recombination_rate: config.recombination_rate,
            ploidy: config.ploidy,
            lineages,
            overlaps: OverlapCounts::new(length, num_samples as u32),
            nodes,
            edges: Vec::new(),
            time: 0.0,
            next_split: 0,
            coalescences: 0,
            recombinations: 0,
            rng: seeded_rng(config.seed),
        })
    }

    /// Run until all ancestral material has coalesced.
    pub fn run(mut self) -> Result<TreeSequence, SimulationError> {
        while !self.lineages.is_empty() {
            self.check_resolvable()?;

            let coalescence_rates = self.coalescence_rates();
            let total_links: u64 = self.lineages.iter().map(Lineage::links).sum();
            let recombination = self.recombination_rate * total_links as f64;
            let total = recombination + coalescence_rates.iter().sum::<f64>();

            let wait = if total > 0.0 {
                Exp::new(total)
                    .map_err(|e| SimulationError::InvalidParameter(format!("event rate {total}: {e}")))?
                    .sample(&mut self.rng)
            } else {
                f64::INFINITY
            };

            let demography = self.demography;
            if let Some(split) = demography.splits().get(self.next_split) {
                if self.time + wait >= split.time {
                    self.time = self.time.max(split.time);
                    for lineage in &mut self.lineages {
                        if split.derived.contains(&lineage.population) {
                            lineage.population = split.ancestral;
                        }
                    }
                    self.next_split += 1;
                    continue;
                }
            }

            if !wait.is_finite() {
                return Err(SimulationError::InfiniteWaitingTime {
                    time: self.time,
                    lineages: self.lineages.len(),
                });
            }
            self.time += wait;

            let u = self.rng.random::<f64>() * total;
            if u < recombination {
                self.recombine(total_links);
            } else {
                let mut target = u - recombination;
                let mut chosen = None;
                for (population, &rate) in coalescence_rates.iter().enumerate() {
                    if rate > 0.0 {
                        chosen = Some(population);
                        if target < rate {
                            break;
                        }
                        target -= rate;
                    }
                }
                if let Some(population) = chosen {
                    self.coalesce(population);
                }
            }
        }

        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            coalescences = self.coalescences,
            recombinations = self.recombinations,
            tmrca = self.time,
            "ancestry simulation finished"
        );

        let populations = self
            .demography
            .populations()
            .iter()
            .enumerate()
            .map(|(id, p)| PopulationRecord {
                id,
                name: p.name.clone(),
            })
            .collect();
        Ok(TreeSequence::new(
            self.sequence_length,
            self.nodes,
            self.edges,
            populations,
        ))
    }

    /// Without migration, lineages in different populations can only meet
    /// through a pending split.
    fn check_resolvable(&self) -> Result<(), SimulationError> {
        if self.next_split < self.demography.splits().len() {
            return Ok(());
        }
        let occupied: BTreeSet<PopulationId> =
            self.lineages.iter().map(|l| l.population).collect();
        if occupied.len() > 1 {
            return Err(SimulationError::InfiniteWaitingTime {
                time: self.time,
                lineages: self.lineages.len(),
            });
        }
        Ok(())
    }

    /// Per-population rate `k(k-1)/2 / (ploidy * N)`.
    fn coalescence_rates(&self) -> Vec<f64> {
        let populations = self.demography.populations();
        let mut counts = vec![0usize; populations.len()];
        for lineage in &self.lineages {
            counts[lineage.population] += 1;
        }
        counts
            .iter()
            .zip(populations)
            .map(|(&k, pop)| {
                if k < 2 {
                    0.0
                } else {
                    let pairs = (k * (k - 1)) as f64 / 2.0;
                    pairs / (self.ploidy as f64 * pop.initial_size)
                }
            })
            .collect()
    }

    /// Pick a breakpoint uniformly among all links and split that lineage.
    fn recombine(&mut self, total_links: u64) {
        let mut target = self.rng.random_range(0..total_links);
        for idx in 0..self.lineages.len() {
            let links = self.lineages[idx].links();
            if target < links {
                let leftmost = self.lineages[idx].leftmost().unwrap_or(0);
                let right = self.lineages[idx].split_at(leftmost + 1 + target);
                self.lineages.push(right);
                self.recombinations += 1;
                return;
            }
            target -= links;
        }
    }

    /// Merge two random lineages of `population`.
    fn coalesce(&mut self, population: PopulationId) {
        let members: Vec<usize> = self
            .lineages
            .iter()
            .enumerate()
            .filter(|(_, l)| l.population == population)
            .map(|(idx, _)| idx)
            .collect();
        let k = members.len();
        if k < 2 {
            return;
        }
        let i = self.rng.random_range(0..k);
        let mut j = self.rng.random_range(0..k - 1);
        if j >= i {
            j += 1;
        }
        let (hi, lo) = if members[i] > members[j] {
            (members[i], members[j])
        } else {
            (members[j], members[i])
        };
        let a = self.lineages.swap_remove(hi);
        let b = self.lineages.swap_remove(lo);

        let merged = self.merge(&a, &b, population);
        self.coalescences += 1;
        if !merged.is_empty() {
            self.lineages.push(merged);
        }
    }

    /// Combine the material of two lineages. Overlapping intervals get a new
    /// parent node at the current time; intervals whose ancestry is now fully
    /// resolved are dropped.
    fn merge(&mut self, a: &Lineage, b: &Lineage, population: PopulationId) -> Lineage {
        let mut breaks: Vec<u64> = a
            .segments
            .iter()
            .chain(b.segments.iter())
            .flat_map(|s| [s.left, s.right])
            .collect();
        breaks.sort_unstable();
        breaks.dedup();

        let mut out = Lineage::new(population, Vec::new());
        let mut parent: Option<NodeId> = None;
        let (mut ia, mut ib) = (0, 0);

        for window in breaks.windows(2) {
            let (x, y) = (window[0], window[1]);
            while ia < a.segments.len() && a.segments[ia].right <= x {
                ia += 1;
            }
            while ib < b.segments.len() && b.segments[ib].right <= x {
                ib += 1;
            }
            let sa = a.segments.get(ia).filter(|s| s.left <= x);
            let sb = b.segments.get(ib).filter(|s| s.left <= x);

            match (sa, sb) {
                (Some(s), None) | (None, Some(s)) => out.push_segment(Segment {
                    left: x,
                    right: y,
                    node: s.node,
                }),
                (Some(sa), Some(sb)) => {
                    let u = match parent {
                        Some(u) => u,
                        None => {
                            let u = self.nodes.len();
                            self.nodes.push(Node {
                                time: self.time,
                                population,
                                is_sample: false,
                            });
                            parent = Some(u);
                            u
                        }
                    };
                    for child in [sa.node, sb.node] {
                        self.edges.push(Edge {
                            left: x,
                            right: y,
                            parent: u,
                            child,
                        });
                    }
                    for (left, right, count) in self.overlaps.decrement(x, y) {
                        if count > 1 {
                            out.push_segment(Segment {
                                left,
                                right,
                                node: u,
                            });
                        }
                    }
                }
                (None, None) => {}
            }
        }
        out
    }
}

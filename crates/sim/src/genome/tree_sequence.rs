//! Tree-sequence tables produced by the ancestry engine and the mutation
//! overlay.
//!
//! A tree sequence stores the genealogies of the sampled genomes along the
//! sequence as node and edge tables: an edge `(left, right, parent, child)`
//! says that over `[left, right)` the parent of `child` is `parent`. Sites
//! and mutations are layered on top of the edges.

use crate::base::Nucleotide;
use crate::genome::{GenotypeMatrix, Trees, Variant};
use crate::simulation::PopulationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index into the node table.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Generations before present
    pub time: f64,
    pub population: PopulationId,
    pub is_sample: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub left: u64,
    pub right: u64,
    pub parent: NodeId,
    pub child: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub position: u64,
    pub ancestral_state: Nucleotide,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// Index into the site table
    pub site: usize,
    /// Node directly below the mutation
    pub node: NodeId,
    pub time: f64,
    pub derived_state: Nucleotide,
    /// Older mutation at the same site that this one overwrites
    pub parent: Option<usize>,
}

/// Name/id pair of a population referenced by the node table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub id: PopulationId,
    pub name: String,
}

/// Immutable set of node, edge, site, mutation and population tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSequence {
    sequence_length: u64,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    sites: Vec<Site>,
    mutations: Vec<Mutation>,
    populations: Vec<PopulationRecord>,
}

impl TreeSequence {
    /// Assemble a tree sequence without sites. Edges are squashed (adjacent
    /// edges with the same parent and child are merged) and sorted by
    /// parent time, then child, then left coordinate.
    pub fn new(
        sequence_length: u64,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        populations: Vec<PopulationRecord>,
    ) -> Self {
        let mut edges = squash_edges(edges);
        edges.sort_by(|a, b| {
            nodes[a.parent]
                .time
                .total_cmp(&nodes[b.parent].time)
                .then(a.parent.cmp(&b.parent))
                .then(a.child.cmp(&b.child))
                .then(a.left.cmp(&b.left))
        });
        Self {
            sequence_length,
            nodes,
            edges,
            sites: Vec::new(),
            mutations: Vec::new(),
            populations,
        }
    }

    /// Copy of this tree sequence with the given sites and mutations.
    ///
    /// Sites must be sorted by position and mutations grouped by site with
    /// older mutations first.
    pub fn with_sites(&self, sites: Vec<Site>, mutations: Vec<Mutation>) -> Self {
        Self {
            sequence_length: self.sequence_length,
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            sites,
            mutations,
            populations: self.populations.clone(),
        }
    }

    pub fn sequence_length(&self) -> u64 {
        self.sequence_length
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn populations(&self) -> &[PopulationRecord] {
        &self.populations
    }

    pub fn population_id(&self, name: &str) -> Option<PopulationId> {
        self.populations
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// Sample node ids in ascending order.
    pub fn samples(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_sample)
            .map(|(id, _)| id)
            .collect()
    }

    pub fn num_samples(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_sample).count()
    }

    /// Sample node ids belonging to `population`.
    pub fn samples_in_population(&self, population: PopulationId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_sample && n.population == population)
            .map(|(id, _)| id)
            .collect()
    }

    /// Iterator over the local trees along the genome.
    pub fn trees(&self) -> Trees<'_> {
        Trees::new(self)
    }

    pub fn num_trees(&self) -> usize {
        let mut trees = self.trees();
        let mut count = 0;
        while trees.advance() {
            count += 1;
        }
        count
    }

    /// Allele of every sample at every site.
    ///
    /// Allele index 0 is always the ancestral state; derived states follow
    /// in order of first appearance among the samples.
    pub fn genotype_matrix(&self) -> GenotypeMatrix {
        let samples = self.samples();
        let mut trees = self.trees();
        let mut variants = Vec::with_capacity(self.sites.len());
        let mut next_mutation = 0;

        for (site_id, site) in self.sites.iter().enumerate() {
            trees.seek(site.position);

            // Youngest mutation per node; mutations are stored oldest first
            let mut state_at: BTreeMap<NodeId, Nucleotide> = BTreeMap::new();
            while next_mutation < self.mutations.len()
                && self.mutations[next_mutation].site == site_id
            {
                let m = &self.mutations[next_mutation];
                state_at.insert(m.node, m.derived_state);
                next_mutation += 1;
            }

            let mut alleles = vec![site.ancestral_state];
            let mut genotypes = Vec::with_capacity(samples.len());
            for &sample in &samples {
                let mut node = Some(sample);
                let mut state = site.ancestral_state;
                while let Some(u) = node {
                    if let Some(&s) = state_at.get(&u) {
                        state = s;
                        break;
                    }
                    node = trees.parent(u);
                }
                let allele = match alleles.iter().position(|&a| a == state) {
                    Some(idx) => idx,
                    None => {
                        alleles.push(state);
                        alleles.len() - 1
                    }
                };
                genotypes.push(allele as u8);
            }

            variants.push(Variant {
                position: site.position,
                alleles,
                genotypes,
            });
        }

        GenotypeMatrix::new(self.sequence_length, samples, variants)
    }
}

/// Merge edges with identical parent and child whose intervals touch.
fn squash_edges(mut edges: Vec<Edge>) -> Vec<Edge> {
    edges.sort_by(|a, b| {
        a.parent
            .cmp(&b.parent)
            .then(a.child.cmp(&b.child))
            .then(a.left.cmp(&b.left))
    });
    let mut out: Vec<Edge> = Vec::with_capacity(edges.len());
    for edge in edges {
        match out.last_mut() {
            Some(last)
                if last.parent == edge.parent
                    && last.child == edge.child
                    && last.right == edge.left =>
            {
                last.right = edge.right;
            }
            _ => out.push(edge),
        }
    }
    out
}

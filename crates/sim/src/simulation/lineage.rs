//! Lineages and ancestral-material bookkeeping for the coalescent engine.

use crate::genome::NodeId;
use crate::simulation::PopulationId;
use std::collections::BTreeMap;

/// Half-open genome interval `[left, right)` carried by a lineage, mapped to
/// the tree-sequence node that currently represents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub left: u64,
    pub right: u64,
    pub node: NodeId,
}

/// An ancestral lineage: sorted, non-overlapping segments in one population.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineage {
    pub population: PopulationId,
    pub segments: Vec<Segment>,
}

impl Lineage {
    pub fn new(population: PopulationId, segments: Vec<Segment>) -> Self {
        Self {
            population,
            segments,
        }
    }

    pub fn leftmost(&self) -> Option<u64> {
        self.segments.first().map(|s| s.left)
    }

    pub fn rightmost(&self) -> Option<u64> {
        self.segments.last().map(|s| s.right)
    }

    /// Number of breakpoints `x` with `leftmost < x < rightmost`.
    pub fn links(&self) -> u64 {
        match (self.leftmost(), self.rightmost()) {
            (Some(l), Some(r)) => r.saturating_sub(l).saturating_sub(1),
            _ => 0,
        }
    }

    /// Split this lineage at breakpoint `x`. Material left of `x` stays,
    /// material right of it is returned as a new lineage in the same
    /// population. Requires `leftmost < x < rightmost`.
    pub fn split_at(&mut self, x: u64) -> Lineage {
        let mut left = Vec::with_capacity(self.segments.len());
        let mut right = Vec::new();
        for seg in self.segments.drain(..) {
            if seg.right <= x {
                left.push(seg);
            } else if seg.left >= x {
                right.push(seg);
            } else {
                left.push(Segment { right: x, ..seg });
                right.push(Segment { left: x, ..seg });
            }
        }
        self.segments = left;
        Lineage::new(self.population, right)
    }

    /// Append a segment, merging it with the previous one when they are
    /// contiguous and map to the same node.
    pub fn push_segment(&mut self, seg: Segment) {
        if let Some(last) = self.segments.last_mut() {
            if last.right == seg.left && last.node == seg.node {
                last.right = seg.right;
                return;
            }
        }
        self.segments.push(seg);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Piecewise-constant count of lineages carrying ancestral material at each
/// position of `[0, sequence_length)`.
///
/// Once the count of an interval drops to one, its most recent common
/// ancestor has been found and the material no longer needs tracking.
#[derive(Debug, Clone)]
pub struct OverlapCounts {
    sequence_length: u64,
    /// Interval start -> count, each interval runs to the next key
    counts: BTreeMap<u64, u32>,
}

impl OverlapCounts {
    pub fn new(sequence_length: u64, initial: u32) -> Self {
        let mut counts = BTreeMap::new();
        counts.insert(0, initial);
        Self {
            sequence_length,
            counts,
        }
    }

    /// Count at a single position.
    pub fn count_at(&self, position: u64) -> u32 {
        self.counts
            .range(..=position)
            .next_back()
            .map(|(_, &c)| c)
            .unwrap_or(0)
    }

    fn split_at(&mut self, x: u64) {
        if x == 0 || x >= self.sequence_length || self.counts.contains_key(&x) {
            return;
        }
        let count = self.count_at(x);
        self.counts.insert(x, count);
    }

    /// Decrement the count over `[left, right)` and return the resulting
    /// sub-intervals together with their new counts.
    pub fn decrement(&mut self, left: u64, right: u64) -> Vec<(u64, u64, u32)> {
        self.split_at(left);
        self.split_at(right);

        let starts: Vec<u64> = self.counts.range(left..right).map(|(&k, _)| k).collect();
        let mut pieces = Vec::with_capacity(starts.len());
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(right);
            if let Some(count) = self.counts.get_mut(&start) {
                *count = count.saturating_sub(1);
                pieces.push((start, end, *count));
            }
        }
        pieces
    }
}

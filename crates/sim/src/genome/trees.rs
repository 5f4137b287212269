//! Sequential traversal of the local trees of a [`TreeSequence`].

use crate::genome::{NodeId, TreeSequence};

/// Moves left to right along the genome, maintaining the parent of every
/// node in the current local tree.
///
/// Edges are inserted when the traversal reaches their left coordinate and
/// removed at their right coordinate, so each step costs only the edges that
/// change between adjacent trees.
#[derive(Debug)]
pub struct Trees<'a> {
    ts: &'a TreeSequence,
    parent: Vec<Option<NodeId>>,
    insertion: Vec<usize>,
    removal: Vec<usize>,
    next_insert: usize,
    next_remove: usize,
    left: u64,
    right: u64,
}

impl<'a> Trees<'a> {
    pub fn new(ts: &'a TreeSequence) -> Self {
        let edges = ts.edges();
        let mut insertion: Vec<usize> = (0..edges.len()).collect();
        insertion.sort_by_key(|&e| edges[e].left);
        let mut removal: Vec<usize> = (0..edges.len()).collect();
        removal.sort_by_key(|&e| edges[e].right);

        Self {
            ts,
            parent: vec![None; ts.num_nodes()],
            insertion,
            removal,
            next_insert: 0,
            next_remove: 0,
            left: 0,
            right: 0,
        }
    }

    /// Move to the next tree. Returns `false` once the whole sequence has
    /// been visited.
    pub fn advance(&mut self) -> bool {
        let length = self.ts.sequence_length();
        if self.right >= length {
            return false;
        }
        let edges = self.ts.edges();
        let x = self.right;

        while self.next_remove < self.removal.len() && edges[self.removal[self.next_remove]].right == x
        {
            let e = edges[self.removal[self.next_remove]];
            self.parent[e.child] = None;
            self.next_remove += 1;
        }
        while self.next_insert < self.insertion.len()
            && edges[self.insertion[self.next_insert]].left == x
        {
            let e = edges[self.insertion[self.next_insert]];
            self.parent[e.child] = Some(e.parent);
            self.next_insert += 1;
        }

        let mut right = length;
        if let Some(&e) = self.insertion.get(self.next_insert) {
            right = right.min(edges[e].left);
        }
        if let Some(&e) = self.removal.get(self.next_remove) {
            right = right.min(edges[e].right);
        }
        self.left = x;
        self.right = right;
        true
    }

    /// Advance until the current tree covers `position`. Positions behind
    /// the current tree are not revisited.
    pub fn seek(&mut self, position: u64) -> bool {
        while self.right <= position {
            if !self.advance() {
                return false;
            }
        }
        self.left <= position
    }

    /// Genome interval `[left, right)` of the current tree.
    pub fn interval(&self) -> (u64, u64) {
        (self.left, self.right)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent.get(node).copied().flatten()
    }

    /// Nodes from `node` up to its root, `node` included.
    pub fn path_to_root(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(p) = self.parent(current) {
            path.push(p);
            current = p;
        }
        path
    }

    /// Root reached from `node` in the current tree.
    pub fn root_of(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(p) = self.parent(current) {
            current = p;
        }
        current
    }
}

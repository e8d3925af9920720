//! Disjoint-set (union-find) over graph vertices.
//!
//! Union by rank with full path compression. When two roots of equal rank
//! are merged, the second root is attached under the first and the first
//! root's rank grows, so representatives are a pure function of the call
//! sequence.

use std::collections::HashMap;

use crate::types::{GraphError, GraphResult, VertexId};

/// A mergeable partition of a fixed vertex set.
#[derive(Debug, Clone)]
pub struct DisjointSet<V> {
    members: Vec<V>,
    index: HashMap<V, usize>,
    parent: Vec<usize>,
    rank: Vec<u32>,
    sets: usize,
}

impl<V: VertexId> DisjointSet<V> {
    /// Create one singleton set per vertex. Duplicates are ignored.
    pub fn new(vertices: impl IntoIterator<Item = V>) -> Self {
        let mut members = Vec::new();
        let mut index = HashMap::new();
        for vertex in vertices {
            if !index.contains_key(&vertex) {
                index.insert(vertex.clone(), members.len());
                members.push(vertex);
            }
        }
        let n = members.len();
        Self {
            members,
            index,
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of disjoint sets.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// True if `vertex` belongs to the structure.
    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Representative of the set containing `vertex`.
    pub fn find(&mut self, vertex: &V) -> GraphResult<V> {
        let i = self.position(vertex)?;
        let root = self.find_index(i);
        Ok(self.members[root].clone())
    }

    /// Merge the sets containing `x` and `y`. Returns false if they were
    /// already joined.
    pub fn union(&mut self, x: &V, y: &V) -> GraphResult<bool> {
        let x = self.position(x)?;
        let y = self.position(y)?;
        Ok(self.union_indices(x, y))
    }

    /// True if `a` and `b` are in the same set.
    pub fn connected(&mut self, a: &V, b: &V) -> GraphResult<bool> {
        let a = self.position(a)?;
        let b = self.position(b)?;
        Ok(self.find_index(a) == self.find_index(b))
    }

    /// Current partition, each set sorted ascending, sets ordered by their
    /// smallest member.
    pub fn sets(&mut self) -> Vec<Vec<V>> {
        let mut groups: HashMap<usize, Vec<V>> = HashMap::new();
        for i in 0..self.members.len() {
            let root = self.find_index(i);
            groups
                .entry(root)
                .or_default()
                .push(self.members[i].clone());
        }
        let mut sets: Vec<Vec<V>> = groups.into_values().collect();
        for set in &mut sets {
            set.sort();
        }
        sets.sort();
        sets
    }

    fn position(&self, vertex: &V) -> GraphResult<usize> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::vertex_not_found(vertex))
    }

    fn find_index(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass: point every node on the path at the root.
        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    pub(crate) fn union_indices(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find_index(x);
        let ry = self.find_index(y);
        if rx == ry {
            return false;
        }
        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    pub(crate) fn find_root_index(&mut self, i: usize) -> usize {
        self.find_index(i)
    }
}

//! Index-based adjacency lists derived from a graph's edge list.

use std::collections::{BTreeSet, HashMap};

use crate::types::{Edge, VertexId};

/// One entry of an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the neighboring vertex.
    pub vertex: usize,
    /// Weight of the connecting edge.
    pub weight: f64,
}

/// Adjacency lists over vertex indices.
///
/// Vertices are indexed in ascending identifier order, and every list is
/// sorted by neighbor index, so iteration order never depends on edge
/// insertion order. Parallel edges keep their insertion order.
#[derive(Debug, Clone)]
pub struct Adjacency<V> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    lists: Vec<Vec<Neighbor>>,
}

impl<V: VertexId> Adjacency<V> {
    /// Build adjacency lists. With `symmetric`, every edge is listed under
    /// both endpoints (self-loops once).
    pub(crate) fn build(vertices: &BTreeSet<V>, edges: &[Edge<V>], symmetric: bool) -> Self {
        let vertices: Vec<V> = vertices.iter().cloned().collect();
        let index: HashMap<V, usize> = vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        let mut lists: Vec<Vec<Neighbor>> = vec![Vec::new(); vertices.len()];

        for edge in edges {
            let (Some(&u), Some(&v)) = (index.get(&edge.from), index.get(&edge.to)) else {
                continue;
            };
            lists[u].push(Neighbor {
                vertex: v,
                weight: edge.weight,
            });
            if symmetric && u != v {
                lists[v].push(Neighbor {
                    vertex: u,
                    weight: edge.weight,
                });
            }
        }

        for list in &mut lists {
            list.sort_by_key(|n| n.vertex);
        }

        Self {
            vertices,
            index,
            lists,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex identifier at `index`.
    pub fn vertex(&self, index: usize) -> &V {
        &self.vertices[index]
    }

    /// All vertices in ascending order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Index of `vertex`, if present.
    pub fn index_of(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    /// Sorted neighbors of the vertex at `index`.
    pub fn neighbors(&self, index: usize) -> &[Neighbor] {
        &self.lists[index]
    }

    /// Materialize the edge `from -> neighbor`.
    pub fn edge(&self, from: usize, neighbor: Neighbor) -> Edge<V> {
        Edge::new(
            self.vertices[from].clone(),
            self.vertices[neighbor.vertex].clone(),
            neighbor.weight,
        )
    }

    /// Map a list of indices back to identifiers.
    pub fn resolve(&self, indices: &[usize]) -> Vec<V> {
        indices.iter().map(|&i| self.vertices[i].clone()).collect()
    }
}

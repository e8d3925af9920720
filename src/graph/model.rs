//! Core graph structure: vertex set, edge list and cached adjacency.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::types::{Edge, GraphError, GraphResult, VertexId};

use super::adjacency::Adjacency;

/// Whether traversal follows edges one way or both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Edges are followed `from -> to` only.
    #[default]
    Directed,
    /// Edges are followed in both directions.
    Undirected,
}

impl GraphKind {
    /// Return a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Directed => "directed",
            Self::Undirected => "undirected",
        }
    }

    /// Parse a kind from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "directed" | "digraph" => Some(Self::Directed),
            "undirected" | "graph" => Some(Self::Undirected),
            _ => None,
        }
    }
}

/// A static vertex/edge set.
///
/// Mutation is append-only. Algorithms only take `&Graph`, and the adjacency
/// caches are `OnceLock`s, so one graph can feed several runs at once.
#[derive(Debug, Clone)]
pub struct Graph<V> {
    kind: GraphKind,
    vertices: BTreeSet<V>,
    edges: Vec<Edge<V>>,
    /// Adjacency following `kind`.
    adjacency: OnceLock<Adjacency<V>>,
    /// Adjacency with every edge listed under both endpoints.
    symmetric: OnceLock<Adjacency<V>>,
}

impl<V: VertexId> Graph<V> {
    /// Create an empty directed graph.
    pub fn new() -> Self {
        Self::with_kind(GraphKind::Directed)
    }

    /// Create an empty undirected graph.
    pub fn undirected() -> Self {
        Self::with_kind(GraphKind::Undirected)
    }

    /// Create an empty graph of the given kind.
    pub fn with_kind(kind: GraphKind) -> Self {
        Self {
            kind,
            vertices: BTreeSet::new(),
            edges: Vec::new(),
            adjacency: OnceLock::new(),
            symmetric: OnceLock::new(),
        }
    }

    /// The graph kind.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// True for directed graphs.
    pub fn is_directed(&self) -> bool {
        self.kind == GraphKind::Directed
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True if `vertex` is in the vertex set.
    pub fn contains(&self, vertex: &V) -> bool {
        self.vertices.contains(vertex)
    }

    /// All vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.iter()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge<V>] {
        &self.edges
    }

    /// Add a vertex. Returns false if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        let inserted = self.vertices.insert(vertex);
        if inserted {
            self.invalidate();
        }
        inserted
    }

    /// Add an edge, inserting both endpoints if needed.
    pub fn add_edge(&mut self, edge: Edge<V>) -> GraphResult<()> {
        edge.validate()?;
        self.vertices.insert(edge.from.clone());
        self.vertices.insert(edge.to.clone());
        self.edges.push(edge);
        self.invalidate();
        Ok(())
    }

    /// Add a weighted edge.
    pub fn add_weighted_edge(&mut self, from: V, to: V, weight: f64) -> GraphResult<()> {
        self.add_edge(Edge::new(from, to, weight))
    }

    /// Add an edge with unit weight.
    pub fn add_unweighted_edge(&mut self, from: V, to: V) -> GraphResult<()> {
        self.add_edge(Edge::unweighted(from, to))
    }

    /// Sorted neighbors of `vertex` with edge weights. Empty for unknown vertices.
    pub fn neighbors(&self, vertex: &V) -> Vec<(&V, f64)> {
        let adjacency = self.adjacency();
        match adjacency.index_of(vertex) {
            Some(i) => adjacency
                .neighbors(i)
                .iter()
                .map(|n| (adjacency.vertex(n.vertex), n.weight))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Number of adjacency entries of `vertex` (out-degree for directed graphs).
    pub fn degree(&self, vertex: &V) -> usize {
        let adjacency = self.adjacency();
        adjacency
            .index_of(vertex)
            .map(|i| adjacency.neighbors(i).len())
            .unwrap_or(0)
    }

    /// Adjacency following the graph kind, built on first use.
    pub fn adjacency(&self) -> &Adjacency<V> {
        self.adjacency.get_or_init(|| {
            log::trace!(
                "building {} adjacency for {} vertices",
                self.kind.name(),
                self.vertices.len()
            );
            Adjacency::build(&self.vertices, &self.edges, self.kind == GraphKind::Undirected)
        })
    }

    /// Adjacency treating every edge as an unordered pair, built on first use.
    pub fn symmetric_adjacency(&self) -> &Adjacency<V> {
        if self.kind == GraphKind::Undirected {
            return self.adjacency();
        }
        self.symmetric
            .get_or_init(|| Adjacency::build(&self.vertices, &self.edges, true))
    }

    /// Fail with `VertexNotFound` unless `vertex` is present.
    pub fn require_vertex(&self, vertex: &V) -> GraphResult<()> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::vertex_not_found(vertex))
        }
    }

    /// Fail with `NegativeWeight`, naming the first offending edge.
    pub fn require_non_negative_weights(&self) -> GraphResult<()> {
        self.edges
            .iter()
            .try_for_each(|edge| edge.require_non_negative())
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    fn invalidate(&mut self) {
        self.adjacency = OnceLock::new();
        self.symmetric = OnceLock::new();
    }
}

impl<V: VertexId> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

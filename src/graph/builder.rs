//! Fluent API for building Graph instances.

use crate::types::{Edge, GraphResult, VertexId};

use super::{Graph, GraphKind};

/// Fluent builder for constructing a [`Graph`].
///
/// Edge validation is deferred to [`GraphBuilder::build`], so chains stay
/// infallible.
pub struct GraphBuilder<V> {
    kind: GraphKind,
    vertices: Vec<V>,
    edges: Vec<Edge<V>>,
}

impl<V: VertexId> GraphBuilder<V> {
    /// Create a builder for a directed graph.
    pub fn new() -> Self {
        Self::with_kind(GraphKind::Directed)
    }

    /// Create a builder for an undirected graph.
    pub fn undirected() -> Self {
        Self::with_kind(GraphKind::Undirected)
    }

    /// Create a builder for a graph of the given kind.
    pub fn with_kind(kind: GraphKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Add a vertex (useful for isolated vertices).
    pub fn vertex(&mut self, vertex: V) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    /// Add several vertices.
    pub fn vertices(&mut self, vertices: impl IntoIterator<Item = V>) -> &mut Self {
        self.vertices.extend(vertices);
        self
    }

    /// Add a weighted edge.
    pub fn edge(&mut self, from: V, to: V, weight: f64) -> &mut Self {
        self.edges.push(Edge::new(from, to, weight));
        self
    }

    /// Add an edge with unit weight.
    pub fn link(&mut self, from: V, to: V) -> &mut Self {
        self.edges.push(Edge::unweighted(from, to));
        self
    }

    /// Add several weighted edges.
    pub fn edges(&mut self, edges: impl IntoIterator<Item = (V, V, f64)>) -> &mut Self {
        self.edges
            .extend(edges.into_iter().map(|(from, to, w)| Edge::new(from, to, w)));
        self
    }

    /// Add several unit-weight edges.
    pub fn links(&mut self, links: impl IntoIterator<Item = (V, V)>) -> &mut Self {
        self.edges
            .extend(links.into_iter().map(|(from, to)| Edge::unweighted(from, to)));
        self
    }

    /// Build the final Graph.
    pub fn build(&mut self) -> GraphResult<Graph<V>> {
        let mut graph = Graph::with_kind(self.kind);
        for vertex in self.vertices.drain(..) {
            graph.add_vertex(vertex);
        }
        for edge in self.edges.drain(..) {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }
}

impl<V: VertexId> Default for GraphBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

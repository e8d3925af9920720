//! Error types for the graph-trace library.

use thiserror::Error;

/// All errors that can occur in the graph-trace library.
///
/// Vertex and edge payloads are rendered with `Display` so the error type
/// stays independent of the vertex identifier type.
#[derive(Error, Debug)]
pub enum GraphError {
    /// A start, source, target or union-find vertex is not in the graph.
    #[error("Vertex {0} not found")]
    VertexNotFound(String),

    /// An algorithm that requires non-negative weights met a negative one.
    #[error("Edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// Edge weight is NaN or infinite.
    #[error("Edge {from} -> {to} has non-finite weight {weight}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// Topological order requested on a graph with a cycle.
    #[error("Cycle present: back edge {from} -> {to}")]
    CyclePresent { from: String, to: String },

    /// Graph file is structurally invalid.
    #[error("Invalid graph file: {0}")]
    InvalidGraphFile(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    /// Build a `VertexNotFound` error from any displayable vertex.
    pub fn vertex_not_found(vertex: &impl std::fmt::Display) -> Self {
        Self::VertexNotFound(vertex.to_string())
    }
}

/// Convenience result type for graph-trace operations.
pub type GraphResult<T> = Result<T, GraphError>;

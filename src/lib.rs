//! graph-trace: deterministic graph algorithms with replayable step traces.
//!
//! Builds directed or undirected weighted graphs and runs breadth-first and
//! depth-first traversal, Dijkstra's shortest paths, and Kruskal's and Prim's
//! minimum spanning trees. Every run returns its result together with an
//! ordered [`StepSequence`] describing each decision the algorithm made.

pub mod cli;
pub mod engine;
pub mod format;
pub mod graph;
pub mod trace;
pub mod types;

// Re-export commonly used types at the crate root
pub use engine::{Algorithm, AlgorithmRun, Engine, EngineConfig, MinimumSpanningTree, ShortestPaths};
pub use format::{GraphFile, GraphReader, TraceDocument, TraceWriter};
pub use graph::{
    BfsTree, DfsForest, DisjointSet, EdgeClass, Graph, GraphBuilder, GraphKind, HopPath,
};
pub use trace::{Auxiliary, Disposition, Step, StepCursor, StepRecorder, StepSequence};
pub use types::{Edge, GraphError, GraphResult, VertexId, UNIT_WEIGHT};

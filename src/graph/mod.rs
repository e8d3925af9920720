//! The graph model, union-find and the traversal engine.

pub mod adjacency;
pub mod builder;
pub mod depth_first;
pub mod disjoint_set;
pub mod model;
pub mod traversal;

pub use adjacency::{Adjacency, Neighbor};
pub use builder::GraphBuilder;
pub use depth_first::{dfs, has_cycle, topological_sort, ClassifiedEdge, DfsForest, DfsTree, EdgeClass};
pub use disjoint_set::DisjointSet;
pub use model::{Graph, GraphKind};
pub use traversal::{bfs, bfs_shortest_path, connected_components, BfsTree, Color, HopPath};

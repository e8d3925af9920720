//! High-level operations: the algorithm engine and its configuration.

pub mod mst;
pub mod shortest_path;

use serde::{Deserialize, Serialize};

use crate::graph::{BfsTree, DfsForest, Graph, HopPath};
use crate::trace::{StepRecorder, StepSequence};
use crate::types::{GraphResult, VertexId};

pub use mst::{kruskal, prim, MinimumSpanningTree};
pub use shortest_path::{dijkstra, ShortestPaths};

/// The algorithms the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Bfs,
    BfsPath,
    Components,
    Dfs,
    TopologicalSort,
    Dijkstra,
    Kruskal,
    Prim,
}

impl Algorithm {
    /// Return a human-readable name for this algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::BfsPath => "bfs_path",
            Self::Components => "components",
            Self::Dfs => "dfs",
            Self::TopologicalSort => "topological_sort",
            Self::Dijkstra => "dijkstra",
            Self::Kruskal => "kruskal",
            Self::Prim => "prim",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Engine-wide settings applied to every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Keep step snapshots. When false every run returns an empty trace.
    pub record_steps: bool,
    /// Stop recording after this many steps and mark the trace truncated.
    pub max_steps: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            record_steps: true,
            max_steps: None,
        }
    }
}

impl EngineConfig {
    /// A fresh recorder for one run.
    pub fn recorder<V: VertexId>(&self) -> StepRecorder<V> {
        match (self.record_steps, self.max_steps) {
            (false, _) => StepRecorder::disabled(),
            (true, Some(max)) => StepRecorder::with_limit(max),
            (true, None) => StepRecorder::new(),
        }
    }
}

/// A finished run: the primary result plus its step trace.
#[derive(Debug, Clone)]
pub struct AlgorithmRun<T, V> {
    /// Which algorithm produced this run.
    pub algorithm: Algorithm,
    /// The algorithm's result.
    pub result: T,
    /// Ordered snapshots, for replay by an external stepper.
    pub steps: StepSequence<V>,
}

/// Runs algorithms against a read-only graph.
///
/// Each call gets its own recorder and scratch state, so one engine (and one
/// graph) can serve any number of runs, including from several threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a specific configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Breadth-first tree from `start`.
    pub fn bfs<V: VertexId>(
        &self,
        graph: &Graph<V>,
        start: &V,
    ) -> GraphResult<AlgorithmRun<BfsTree<V>, V>> {
        self.run(Algorithm::Bfs, |recorder| crate::graph::bfs(graph, start, recorder))
    }

    /// Fewest-edges path from `start` to `target`; `None` if unreachable.
    pub fn bfs_path<V: VertexId>(
        &self,
        graph: &Graph<V>,
        start: &V,
        target: &V,
    ) -> GraphResult<AlgorithmRun<Option<HopPath<V>>, V>> {
        self.run(Algorithm::BfsPath, |recorder| {
            crate::graph::bfs_shortest_path(graph, start, target, recorder)
        })
    }

    /// Components by repeated BFS.
    pub fn components<V: VertexId>(
        &self,
        graph: &Graph<V>,
    ) -> GraphResult<AlgorithmRun<Vec<Vec<V>>, V>> {
        self.run(Algorithm::Components, |recorder| {
            Ok(crate::graph::connected_components(graph, recorder))
        })
    }

    /// Full DFS forest, optionally starting at `start`.
    pub fn dfs<V: VertexId>(
        &self,
        graph: &Graph<V>,
        start: Option<&V>,
    ) -> GraphResult<AlgorithmRun<DfsForest<V>, V>> {
        self.run(Algorithm::Dfs, |recorder| crate::graph::dfs(graph, start, recorder))
    }

    /// Topological order; fails with `CyclePresent` on cyclic graphs.
    pub fn topological_sort<V: VertexId>(
        &self,
        graph: &Graph<V>,
    ) -> GraphResult<AlgorithmRun<Vec<V>, V>> {
        self.run(Algorithm::TopologicalSort, |recorder| {
            crate::graph::topological_sort(graph, recorder)
        })
    }

    /// Dijkstra from `source`.
    pub fn dijkstra<V: VertexId>(
        &self,
        graph: &Graph<V>,
        source: &V,
    ) -> GraphResult<AlgorithmRun<ShortestPaths<V>, V>> {
        self.run(Algorithm::Dijkstra, |recorder| {
            dijkstra(graph, source, recorder)
        })
    }

    /// Kruskal's minimum spanning forest.
    pub fn kruskal<V: VertexId>(
        &self,
        graph: &Graph<V>,
    ) -> GraphResult<AlgorithmRun<MinimumSpanningTree<V>, V>> {
        self.run(Algorithm::Kruskal, |recorder| kruskal(graph, recorder))
    }

    /// Prim's minimum spanning tree from `start`.
    pub fn prim<V: VertexId>(
        &self,
        graph: &Graph<V>,
        start: &V,
    ) -> GraphResult<AlgorithmRun<MinimumSpanningTree<V>, V>> {
        self.run(Algorithm::Prim, |recorder| prim(graph, start, recorder))
    }

    fn run<T, V: VertexId>(
        &self,
        algorithm: Algorithm,
        body: impl FnOnce(&mut StepRecorder<V>) -> GraphResult<T>,
    ) -> GraphResult<AlgorithmRun<T, V>> {
        let mut recorder = self.config.recorder();
        let result = body(&mut recorder).map_err(|e| {
            log::debug!("{} failed: {}", algorithm, e);
            e
        })?;
        let steps = recorder.finish();
        log::debug!(
            "{} finished with {} steps{}",
            algorithm,
            steps.len(),
            if steps.is_truncated() { " (truncated)" } else { "" }
        );
        Ok(AlgorithmRun {
            algorithm,
            result,
            steps,
        })
    }
}

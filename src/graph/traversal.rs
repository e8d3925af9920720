//! Breadth-first traversal: spanning tree, hop distances, components.

use std::collections::{BTreeMap, VecDeque};

use crate::trace::{Auxiliary, Disposition, StepRecorder};
use crate::types::{Edge, GraphError, GraphResult, VertexId};

use super::adjacency::Adjacency;
use super::Graph;

const BFS_TITLE: &str = "Breadth-first search";
const COMPONENTS_TITLE: &str = "Connected components";

/// Vertex state during a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Not yet discovered.
    White,
    /// Discovered, still being processed.
    Gray,
    /// Finished.
    Black,
}

/// Per-run scratch data, indexed by adjacency vertex index.
///
/// Owned by a single traversal call; the DFS clock lives here rather than in
/// any shared location.
#[derive(Debug)]
pub(crate) struct TraversalState {
    pub color: Vec<Color>,
    pub predecessor: Vec<Option<usize>>,
    pub distance: Vec<Option<usize>>,
    pub discovery: Vec<u32>,
    pub finish: Vec<u32>,
    pub clock: u32,
}

impl TraversalState {
    pub fn new(n: usize) -> Self {
        Self {
            color: vec![Color::White; n],
            predecessor: vec![None; n],
            distance: vec![None; n],
            discovery: vec![0; n],
            finish: vec![0; n],
            clock: 0,
        }
    }

    pub fn is_white(&self, i: usize) -> bool {
        self.color[i] == Color::White
    }

    /// Advance the clock and return the new time.
    pub fn tick(&mut self) -> u32 {
        self.clock += 1;
        self.clock
    }
}

/// Result of a breadth-first search from one start vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct BfsTree<V> {
    /// The start vertex.
    pub start: V,
    /// Tree edges in discovery order.
    pub tree_edges: Vec<Edge<V>>,
    /// Vertices in the order they were discovered.
    pub order: Vec<V>,
    /// Hop count from `start` for every reached vertex.
    pub distances: BTreeMap<V, usize>,
    /// Discovering vertex for every reached vertex except `start`.
    pub predecessors: BTreeMap<V, V>,
}

impl<V: VertexId> BfsTree<V> {
    fn empty(start: V) -> Self {
        Self {
            start,
            tree_edges: Vec::new(),
            order: Vec::new(),
            distances: BTreeMap::new(),
            predecessors: BTreeMap::new(),
        }
    }

    /// Hop distance to `vertex`; `None` means unreachable (infinite).
    pub fn distance(&self, vertex: &V) -> Option<usize> {
        self.distances.get(vertex).copied()
    }

    /// True if `vertex` was reached.
    pub fn is_reachable(&self, vertex: &V) -> bool {
        self.distances.contains_key(vertex)
    }

    /// Path from `start` to `vertex`, walking predecessors backward.
    pub fn path_to(&self, vertex: &V) -> Option<Vec<V>> {
        if !self.is_reachable(vertex) {
            return None;
        }
        let mut path = vec![vertex.clone()];
        let mut current = vertex;
        while let Some(prev) = self.predecessors.get(current) {
            path.push(prev.clone());
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Reached vertices grouped by hop distance, each level in discovery order.
    pub fn levels(&self) -> Vec<Vec<V>> {
        let mut levels: Vec<Vec<V>> = Vec::new();
        for vertex in &self.order {
            let Some(depth) = self.distance(vertex) else {
                continue;
            };
            if levels.len() <= depth {
                levels.resize_with(depth + 1, Vec::new);
            }
            levels[depth].push(vertex.clone());
        }
        levels
    }
}

/// A shortest path counted in edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopPath<V> {
    /// Vertices from start to target inclusive.
    pub vertices: Vec<V>,
    /// Number of edges on the path.
    pub hops: usize,
}

/// BFS from `start`, visiting neighbors in ascending order.
///
/// Vertices are marked when enqueued, so each is enqueued exactly once.
pub fn bfs<V: VertexId>(
    graph: &Graph<V>,
    start: &V,
    recorder: &mut StepRecorder<V>,
) -> GraphResult<BfsTree<V>> {
    if graph.is_empty() {
        return Ok(BfsTree::empty(start.clone()));
    }

    let adjacency = graph.adjacency();
    let mut state = TraversalState::new(adjacency.len());
    let mut tree = BfsTree::empty(start.clone());
    let root = adjacency
        .index_of(start)
        .ok_or_else(|| GraphError::vertex_not_found(start))?;

    if let Some(step) = recorder.step(BFS_TITLE) {
        step.subtitle(format!("Start from vertex {}", start))
            .aux("visitedVertices", Auxiliary::Vertices(vec![start.clone()]))
            .aux("queue", Auxiliary::Vertices(vec![start.clone()]))
            .push();
    }

    let order = explore(adjacency, root, &mut state, recorder, BFS_TITLE, &mut tree.tree_edges);

    for &i in &order {
        let vertex = adjacency.vertex(i).clone();
        if let Some(d) = state.distance[i] {
            tree.distances.insert(vertex.clone(), d);
        }
        if let Some(p) = state.predecessor[i] {
            tree.predecessors.insert(vertex, adjacency.vertex(p).clone());
        }
    }
    tree.order = adjacency.resolve(&order);

    if let Some(step) = recorder.step(BFS_TITLE) {
        step.subtitle(format!(
            "Reached {} of {} vertices",
            tree.order.len(),
            adjacency.len()
        ))
        .aux("visitedVertices", Auxiliary::Vertices(tree.order.clone()))
        .push();
    }

    log::debug!(
        "bfs from {}: reached {} of {} vertices",
        start,
        tree.order.len(),
        adjacency.len()
    );
    Ok(tree)
}

/// Shortest path by edge count (weights ignored).
///
/// Returns `Ok(None)` when `target` is never discovered.
pub fn bfs_shortest_path<V: VertexId>(
    graph: &Graph<V>,
    start: &V,
    target: &V,
    recorder: &mut StepRecorder<V>,
) -> GraphResult<Option<HopPath<V>>> {
    if graph.is_empty() {
        return Ok(None);
    }
    graph.require_vertex(target)?;
    let tree = bfs(graph, start, recorder)?;
    Ok(tree.path_to(target).map(|vertices| HopPath {
        hops: vertices.len() - 1,
        vertices,
    }))
}

/// Repeat BFS from every undiscovered vertex in ascending order.
///
/// Each component is sorted ascending. On directed graphs a component is the
/// set of still-undiscovered vertices reachable from its seed.
pub fn connected_components<V: VertexId>(
    graph: &Graph<V>,
    recorder: &mut StepRecorder<V>,
) -> Vec<Vec<V>> {
    let adjacency = graph.adjacency();
    let mut state = TraversalState::new(adjacency.len());
    let mut tree_edges = Vec::new();
    let mut components = Vec::new();

    for seed in 0..adjacency.len() {
        if !state.is_white(seed) {
            continue;
        }
        if let Some(step) = recorder.step(COMPONENTS_TITLE) {
            step.subtitle(format!(
                "Component {} seeded at {}",
                components.len() + 1,
                adjacency.vertex(seed)
            ))
            .push();
        }
        let mut members = explore(
            adjacency,
            seed,
            &mut state,
            recorder,
            COMPONENTS_TITLE,
            &mut tree_edges,
        );
        members.sort_unstable();
        components.push(adjacency.resolve(&members));
    }

    log::debug!(
        "found {} components over {} vertices",
        components.len(),
        adjacency.len()
    );
    components
}

/// Queue-based expansion from `root`; returns vertices in discovery order.
fn explore<V: VertexId>(
    adjacency: &Adjacency<V>,
    root: usize,
    state: &mut TraversalState,
    recorder: &mut StepRecorder<V>,
    title: &str,
    tree_edges: &mut Vec<Edge<V>>,
) -> Vec<usize> {
    let mut order = vec![root];
    let mut queue = VecDeque::from([root]);
    state.color[root] = Color::Gray;
    state.distance[root] = Some(0);

    while let Some(u) = queue.pop_front() {
        let depth = state.distance[u].unwrap_or(0);
        for &neighbor in adjacency.neighbors(u) {
            let v = neighbor.vertex;
            let edge = adjacency.edge(u, neighbor);
            let discovered = state.is_white(v);
            if discovered {
                state.color[v] = Color::Gray;
                state.distance[v] = Some(depth + 1);
                state.predecessor[v] = Some(u);
                order.push(v);
                queue.push_back(v);
                recorder.accept(&edge);
                log::trace!("bfs tree edge {} -> {}", edge.from, edge.to);
            }
            if let Some(step) = recorder.step(title) {
                let (disposition, subtitle) = if discovered {
                    (
                        Disposition::Accepted,
                        format!("Discover {} at distance {}", edge.to, depth + 1),
                    )
                } else {
                    (
                        Disposition::Rejected,
                        format!("{} already discovered", edge.to),
                    )
                };
                step.subtitle(subtitle)
                    .considering(&edge, disposition)
                    .aux("visitedVertices", Auxiliary::Vertices(adjacency.resolve(&order)))
                    .aux(
                        "queue",
                        Auxiliary::Vertices(queue.iter().map(|&i| adjacency.vertex(i).clone()).collect()),
                    )
                    .push();
            }
            if discovered {
                tree_edges.push(edge);
            }
        }
        state.color[u] = Color::Black;
    }

    order
}

//! Depth-first traversal with timestamps and edge classification.
//!
//! The visit runs on an explicit stack of `(vertex, next neighbor)` frames,
//! so recursion depth never limits graph size. Discovery pre-increments the
//! clock; finishing increments it again after every neighbor is examined.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::trace::{Auxiliary, Disposition, StepRecorder};
use crate::types::{Edge, GraphError, GraphResult, VertexId};

use super::adjacency::Adjacency;
use super::traversal::{Color, TraversalState};
use super::{Graph, GraphKind};

const DFS_TITLE: &str = "Depth-first search";

/// Classification of an edge examined by DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeClass {
    /// Discovered its target.
    Tree,
    /// Points at a gray ancestor; witnesses a cycle.
    Back,
    /// Points at a finished descendant.
    Forward,
    /// Points at a finished vertex in another subtree or tree.
    Cross,
}

impl EdgeClass {
    /// Single-letter tag (T, B, F, C).
    pub fn symbol(&self) -> char {
        match self {
            Self::Tree => 'T',
            Self::Back => 'B',
            Self::Forward => 'F',
            Self::Cross => 'C',
        }
    }

    /// Return a human-readable name for this class.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Cross => "cross",
        }
    }
}

impl std::fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} edge ({})", self.name(), self.symbol())
    }
}

/// An examined edge with its class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEdge<V> {
    pub edge: Edge<V>,
    pub class: EdgeClass,
}

/// One tree of a DFS forest.
#[derive(Debug, Clone, PartialEq)]
pub struct DfsTree<V> {
    /// Vertex the tree was grown from.
    pub root: V,
    /// Tree edges in discovery order.
    pub edges: Vec<Edge<V>>,
    /// Vertices in preorder.
    pub order: Vec<V>,
}

/// Result of a full depth-first search.
#[derive(Debug, Clone, PartialEq)]
pub struct DfsForest<V> {
    /// Vertices in discovery (preorder) order across all trees.
    pub order: Vec<V>,
    /// All tree edges in discovery order.
    pub tree_edges: Vec<Edge<V>>,
    /// The trees, in the order their roots were chosen.
    pub trees: Vec<DfsTree<V>>,
    /// Discovery time per vertex.
    pub discovery: BTreeMap<V, u32>,
    /// Finish time per vertex.
    pub finish: BTreeMap<V, u32>,
    /// Parent in the forest for every non-root vertex.
    pub predecessors: BTreeMap<V, V>,
    /// Every examined edge with its class, in examination order.
    pub classified: Vec<ClassifiedEdge<V>>,
}

impl<V: VertexId> DfsForest<V> {
    fn empty() -> Self {
        Self {
            order: Vec::new(),
            tree_edges: Vec::new(),
            trees: Vec::new(),
            discovery: BTreeMap::new(),
            finish: BTreeMap::new(),
            predecessors: BTreeMap::new(),
            classified: Vec::new(),
        }
    }

    /// True iff at least one back edge was found.
    pub fn has_cycle(&self) -> bool {
        self.classified.iter().any(|c| c.class == EdgeClass::Back)
    }

    /// All back edges.
    pub fn back_edges(&self) -> impl Iterator<Item = &Edge<V>> + '_ {
        self.classified
            .iter()
            .filter(|c| c.class == EdgeClass::Back)
            .map(|c| &c.edge)
    }

    /// Class of the first examined edge `from -> to`.
    pub fn class_of(&self, from: &V, to: &V) -> Option<EdgeClass> {
        self.classified
            .iter()
            .find(|c| &c.edge.from == from && &c.edge.to == to)
            .map(|c| c.class)
    }

    /// Number of edges of the given class.
    pub fn count(&self, class: EdgeClass) -> usize {
        self.classified.iter().filter(|c| c.class == class).count()
    }

    /// `(discovery, finish)` for `vertex`.
    pub fn timestamps(&self, vertex: &V) -> Option<(u32, u32)> {
        Some((*self.discovery.get(vertex)?, *self.finish.get(vertex)?))
    }

    /// Vertices by descending finish time.
    ///
    /// Fails with `CyclePresent`, naming the first back edge, when the
    /// traversed graph has a cycle.
    pub fn topological_order(&self) -> GraphResult<Vec<V>> {
        if let Some(edge) = self.back_edges().next() {
            return Err(GraphError::CyclePresent {
                from: edge.from.to_string(),
                to: edge.to.to_string(),
            });
        }
        let mut vertices: Vec<(&V, u32)> = self.finish.iter().map(|(v, &f)| (v, f)).collect();
        vertices.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(vertices.into_iter().map(|(v, _)| v.clone()).collect())
    }
}

/// A suspended visit: the vertex and the position of its next neighbor.
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    next: usize,
    skipped_parent: bool,
}

/// DFS over the whole graph.
///
/// Starts at `start` when given, then grows a new tree from every remaining
/// white vertex in ascending order.
pub fn dfs<V: VertexId>(
    graph: &Graph<V>,
    start: Option<&V>,
    recorder: &mut StepRecorder<V>,
) -> GraphResult<DfsForest<V>> {
    if graph.is_empty() {
        return Ok(DfsForest::empty());
    }
    let adjacency = graph.adjacency();
    let first = match start {
        Some(vertex) => Some(
            adjacency
                .index_of(vertex)
                .ok_or_else(|| GraphError::vertex_not_found(vertex))?,
        ),
        None => None,
    };

    let mut walker = Walker {
        adjacency,
        undirected: graph.kind() == GraphKind::Undirected,
        state: TraversalState::new(adjacency.len()),
        recorder,
        forest: DfsForest::empty(),
        preorder: Vec::new(),
    };

    let roots = first.into_iter().chain(0..adjacency.len());
    for root in roots {
        if walker.state.is_white(root) {
            walker.grow_tree(root);
        }
    }

    let forest = walker.into_forest();
    log::debug!(
        "dfs: {} vertices, {} trees, {} back edges",
        forest.order.len(),
        forest.trees.len(),
        forest.count(EdgeClass::Back)
    );
    Ok(forest)
}

/// True iff the graph contains a cycle (a DFS back edge exists).
pub fn has_cycle<V: VertexId>(graph: &Graph<V>) -> bool {
    dfs(graph, None, &mut StepRecorder::disabled())
        .map(|forest| forest.has_cycle())
        .unwrap_or(false)
}

/// Topological order by descending DFS finish time.
pub fn topological_sort<V: VertexId>(
    graph: &Graph<V>,
    recorder: &mut StepRecorder<V>,
) -> GraphResult<Vec<V>> {
    dfs(graph, None, recorder)?.topological_order()
}

struct Walker<'a, V> {
    adjacency: &'a Adjacency<V>,
    undirected: bool,
    state: TraversalState,
    recorder: &'a mut StepRecorder<V>,
    forest: DfsForest<V>,
    preorder: Vec<usize>,
}

impl<V: VertexId> Walker<'_, V> {
    fn grow_tree(&mut self, root: usize) {
        let tree_start = self.preorder.len();
        let edges_start = self.forest.tree_edges.len();

        if let Some(step) = self.recorder.step(DFS_TITLE) {
            step.subtitle(format!("New tree rooted at {}", self.adjacency.vertex(root)))
                .push();
        }

        self.discover(root);
        let mut stack = vec![Frame {
            vertex: root,
            next: 0,
            skipped_parent: false,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.vertex;
            let Some(&neighbor) = self.adjacency.neighbors(u).get(frame.next) else {
                stack.pop();
                self.finish(u);
                continue;
            };
            frame.next += 1;
            let v = neighbor.vertex;

            if self.undirected && !frame.skipped_parent && self.state.predecessor[u] == Some(v) {
                // The tree edge seen from the child's side.
                frame.skipped_parent = true;
                continue;
            }

            let class = match self.state.color[v] {
                Color::White => EdgeClass::Tree,
                Color::Gray => EdgeClass::Back,
                // Already classified from the other endpoint.
                Color::Black if self.undirected => continue,
                Color::Black if self.state.discovery[u] < self.state.discovery[v] => {
                    EdgeClass::Forward
                }
                Color::Black => EdgeClass::Cross,
            };

            let edge = self.adjacency.edge(u, neighbor);
            self.classify(&edge, class);

            if class == EdgeClass::Tree {
                self.state.predecessor[v] = Some(u);
                self.forest.tree_edges.push(edge);
                self.discover(v);
                stack.push(Frame {
                    vertex: v,
                    next: 0,
                    skipped_parent: false,
                });
            }
        }

        self.forest.trees.push(DfsTree {
            root: self.adjacency.vertex(root).clone(),
            edges: self.forest.tree_edges[edges_start..].to_vec(),
            order: self.adjacency.resolve(&self.preorder[tree_start..]),
        });
    }

    fn discover(&mut self, u: usize) {
        let time = self.state.tick();
        self.state.discovery[u] = time;
        self.state.color[u] = Color::Gray;
        self.preorder.push(u);
        log::trace!("discover {} at {}", self.adjacency.vertex(u), time);

        if let Some(step) = self.recorder.step(DFS_TITLE) {
            step.subtitle(format!(
                "Discover {} at time {}",
                self.adjacency.vertex(u),
                time
            ))
            .aux(
                "visitedVertices",
                Auxiliary::Vertices(self.adjacency.resolve(&self.preorder)),
            )
            .aux("clock", Auxiliary::Number(f64::from(time)))
            .push();
        }
    }

    fn finish(&mut self, u: usize) {
        self.state.color[u] = Color::Black;
        let time = self.state.tick();
        self.state.finish[u] = time;
        log::trace!("finish {} at {}", self.adjacency.vertex(u), time);

        if let Some(step) = self.recorder.step(DFS_TITLE) {
            step.subtitle(format!(
                "Finish {} at time {}",
                self.adjacency.vertex(u),
                time
            ))
            .aux(
                "visitedVertices",
                Auxiliary::Vertices(self.adjacency.resolve(&self.preorder)),
            )
            .aux("clock", Auxiliary::Number(f64::from(time)))
            .push();
        }
    }

    fn classify(&mut self, edge: &Edge<V>, class: EdgeClass) {
        if class == EdgeClass::Tree {
            self.recorder.accept(edge);
        }
        if let Some(step) = self.recorder.step(DFS_TITLE) {
            let disposition = if class == EdgeClass::Tree {
                Disposition::Accepted
            } else {
                Disposition::Rejected
            };
            step.subtitle(format!("Edge {} -> {}: {}", edge.from, edge.to, class))
                .considering(edge, disposition)
                .aux("edgeClass", Auxiliary::Text(class.name().to_string()))
                .push();
        }
        self.forest.classified.push(ClassifiedEdge {
            edge: edge.clone(),
            class,
        });
    }

    fn into_forest(self) -> DfsForest<V> {
        let adjacency = self.adjacency;
        let state = self.state;
        let mut forest = self.forest;
        forest.order = adjacency.resolve(&self.preorder);
        for &u in &self.preorder {
            let vertex = adjacency.vertex(u).clone();
            forest.discovery.insert(vertex.clone(), state.discovery[u]);
            forest.finish.insert(vertex.clone(), state.finish[u]);
            if let Some(p) = state.predecessor[u] {
                forest.predecessors.insert(vertex, adjacency.vertex(p).clone());
            }
        }
        forest
    }
}

//! Minimum spanning trees by Kruskal (edge-sorted greedy) and Prim
//! (frontier expansion). Both treat every edge as an unordered pair.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::graph::{DisjointSet, Graph};
use crate::trace::{Auxiliary, Disposition, StepRecorder};
use crate::types::{Edge, GraphError, GraphResult, VertexId};

const KRUSKAL_TITLE: &str = "Kruskal's algorithm";
const PRIM_TITLE: &str = "Prim's algorithm";

/// Result of an MST run.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumSpanningTree<V> {
    /// Accepted edges in acceptance order.
    pub edges: Vec<Edge<V>>,
    /// Sum of accepted edge weights.
    pub total_weight: f64,
    /// Connected pieces of the vertex set under the accepted edges.
    pub component_count: usize,
}

impl<V: VertexId> MinimumSpanningTree<V> {
    fn empty() -> Self {
        Self {
            edges: Vec::new(),
            total_weight: 0.0,
            component_count: 0,
        }
    }

    /// True if the accepted edges connect every vertex.
    pub fn is_spanning(&self) -> bool {
        self.component_count <= 1
    }

    /// True if an edge between `a` and `b` (either orientation) was accepted.
    pub fn contains_edge(&self, a: &V, b: &V) -> bool {
        self.edges
            .iter()
            .any(|e| (&e.from == a && &e.to == b) || (&e.from == b && &e.to == a))
    }
}

/// Kruskal's algorithm.
///
/// Edges are sorted ascending by weight, stable on insertion order. Every
/// edge is scanned, so a disconnected graph yields a minimum spanning forest.
pub fn kruskal<V: VertexId>(
    graph: &Graph<V>,
    recorder: &mut StepRecorder<V>,
) -> GraphResult<MinimumSpanningTree<V>> {
    if graph.is_empty() {
        return Ok(MinimumSpanningTree::empty());
    }
    graph.require_non_negative_weights()?;

    let adjacency = graph.symmetric_adjacency();
    let mut sets = DisjointSet::new(adjacency.vertices().iter().cloned());
    let mut sorted: Vec<&Edge<V>> = graph.edges().iter().collect();
    sorted.sort_by(|a, b| a.weight.total_cmp(&b.weight));

    let mut mst = MinimumSpanningTree::empty();

    if let Some(step) = recorder.step(KRUSKAL_TITLE) {
        step.aux("components", Auxiliary::Number(sets.set_count() as f64))
            .push();
    }

    for edge in sorted {
        if let Some(step) = recorder.step(KRUSKAL_TITLE) {
            step.subtitle(format!(
                "Considering edge ({}, {}) with weight {}",
                edge.from, edge.to, edge.weight
            ))
            .considering(edge, Disposition::Pending)
            .push();
        }

        let (u, v) = match (adjacency.index_of(&edge.from), adjacency.index_of(&edge.to)) {
            (Some(u), Some(v)) => (u, v),
            (None, _) => return Err(GraphError::vertex_not_found(&edge.from)),
            (_, None) => return Err(GraphError::vertex_not_found(&edge.to)),
        };
        let root_u = sets.find_root_index(u);
        let root_v = sets.find_root_index(v);

        if root_u != root_v {
            sets.union_indices(root_u, root_v);
            mst.total_weight += edge.weight;
            mst.edges.push(edge.clone());
            recorder.accept(edge);
            log::trace!("kruskal accept {}", edge);
            if let Some(step) = recorder.step(KRUSKAL_TITLE) {
                step.subtitle(format!("Edge ({}, {}) added to the tree", edge.from, edge.to))
                    .considering(edge, Disposition::Accepted)
                    .aux("components", Auxiliary::Number(sets.set_count() as f64))
                    .push();
            }
        } else {
            log::trace!("kruskal reject {}", edge);
            if let Some(step) = recorder.step(KRUSKAL_TITLE) {
                step.subtitle(format!(
                    "Edge ({}, {}) rejected: it would form a cycle",
                    edge.from, edge.to
                ))
                .considering(edge, Disposition::Rejected)
                .aux("components", Auxiliary::Number(sets.set_count() as f64))
                .push();
            }
        }
    }

    mst.component_count = sets.set_count();

    if let Some(step) = recorder.step("Minimum spanning tree (Kruskal)") {
        step.subtitle(format!("Total weight: {}", mst.total_weight))
            .aux("components", Auxiliary::Number(mst.component_count as f64))
            .push();
    }

    log::debug!(
        "kruskal: {} edges, total weight {}, {} components",
        mst.edges.len(),
        mst.total_weight,
        mst.component_count
    );
    Ok(mst)
}

/// Frontier heap entry ordered by weight, then endpoint indices.
#[derive(Debug, Clone, Copy)]
struct FrontierEdge {
    weight: f64,
    from: usize,
    to: usize,
}

impl PartialEq for FrontierEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEdge {}

impl PartialOrd for FrontierEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.from.cmp(&other.from))
            .then_with(|| self.to.cmp(&other.to))
    }
}

/// Prim's algorithm from `start`.
///
/// Only the start vertex's component is spanned. Every step carries the
/// visited vertices in visit order under `visitedVertices`.
pub fn prim<V: VertexId>(
    graph: &Graph<V>,
    start: &V,
    recorder: &mut StepRecorder<V>,
) -> GraphResult<MinimumSpanningTree<V>> {
    if graph.is_empty() {
        return Ok(MinimumSpanningTree::empty());
    }
    graph.require_non_negative_weights()?;

    let adjacency = graph.symmetric_adjacency();
    let root = adjacency
        .index_of(start)
        .ok_or_else(|| GraphError::vertex_not_found(start))?;
    let n = adjacency.len();

    let mut visited = vec![false; n];
    let mut visit_order = vec![root];
    let mut heap = BinaryHeap::new();
    let mut mst = MinimumSpanningTree::empty();
    visited[root] = true;

    let push_frontier = |heap: &mut BinaryHeap<Reverse<FrontierEdge>>, visited: &[bool], u: usize| {
        for neighbor in adjacency.neighbors(u) {
            if !visited[neighbor.vertex] {
                heap.push(Reverse(FrontierEdge {
                    weight: neighbor.weight,
                    from: u,
                    to: neighbor.vertex,
                }));
            }
        }
    };
    push_frontier(&mut heap, &visited, root);

    if let Some(step) = recorder.step(format!("{} - start from vertex {}", PRIM_TITLE, start)) {
        step.aux(
            "visitedVertices",
            Auxiliary::Vertices(adjacency.resolve(&visit_order)),
        )
        .push();
    }

    while visit_order.len() < n {
        let Some(Reverse(frontier)) = heap.pop() else {
            break;
        };
        let edge = Edge::new(
            adjacency.vertex(frontier.from).clone(),
            adjacency.vertex(frontier.to).clone(),
            frontier.weight,
        );

        if let Some(step) = recorder.step(PRIM_TITLE) {
            step.subtitle(format!(
                "Considering edge ({}, {}) with weight {}",
                edge.from, edge.to, edge.weight
            ))
            .considering(&edge, Disposition::Pending)
            .aux(
                "visitedVertices",
                Auxiliary::Vertices(adjacency.resolve(&visit_order)),
            )
            .push();
        }

        if visited[frontier.to] {
            log::trace!("prim reject {}", edge);
            if let Some(step) = recorder.step(PRIM_TITLE) {
                step.subtitle(format!(
                    "Edge ({}, {}) rejected: it would form a cycle",
                    edge.from, edge.to
                ))
                .considering(&edge, Disposition::Rejected)
                .aux(
                    "visitedVertices",
                    Auxiliary::Vertices(adjacency.resolve(&visit_order)),
                )
                .push();
            }
            continue;
        }

        visited[frontier.to] = true;
        visit_order.push(frontier.to);
        mst.total_weight += edge.weight;
        recorder.accept(&edge);
        log::trace!("prim accept {}", edge);

        if let Some(step) = recorder.step(PRIM_TITLE) {
            step.subtitle(format!("Edge ({}, {}) added to the tree", edge.from, edge.to))
                .considering(&edge, Disposition::Accepted)
                .aux(
                    "visitedVertices",
                    Auxiliary::Vertices(adjacency.resolve(&visit_order)),
                )
                .push();
        }
        mst.edges.push(edge);
        push_frontier(&mut heap, &visited, frontier.to);
    }

    mst.component_count = 1 + (n - visit_order.len());

    if let Some(step) = recorder.step("Minimum spanning tree (Prim)") {
        step.subtitle(format!("Total weight: {}", mst.total_weight))
            .aux(
                "visitedVertices",
                Auxiliary::Vertices(adjacency.resolve(&visit_order)),
            )
            .push();
    }

    log::debug!(
        "prim from {}: {} edges, total weight {}, visited {} of {} vertices",
        start,
        mst.edges.len(),
        mst.total_weight,
        visit_order.len(),
        n
    );
    Ok(mst)
}

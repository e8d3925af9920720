//! Dijkstra's single-source shortest paths.
//!
//! Binary min-heap with lazy deletion: improved distances are pushed as new
//! entries, and entries whose distance exceeds the recorded best are skipped
//! when popped. No decrease-key.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};

use crate::graph::Graph;
use crate::trace::{Auxiliary, Disposition, StepRecorder};
use crate::types::{Edge, GraphError, GraphResult, VertexId};

const DIJKSTRA_TITLE: &str = "Dijkstra's algorithm";

/// Shortest distances and predecessors from one source.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths<V> {
    /// The source vertex.
    pub source: V,
    /// Distance for every vertex; `f64::INFINITY` when unreachable.
    pub distances: BTreeMap<V, f64>,
    /// The edge that last improved each reached vertex (none for the source).
    pub predecessors: BTreeMap<V, Edge<V>>,
}

impl<V: VertexId> ShortestPaths<V> {
    /// Distance to `vertex`; infinite when unreachable or unknown.
    pub fn distance(&self, vertex: &V) -> f64 {
        self.distances
            .get(vertex)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// True if `vertex` has a finite distance.
    pub fn is_reachable(&self, vertex: &V) -> bool {
        self.distance(vertex).is_finite()
    }

    /// Predecessor of `vertex` on its shortest path.
    pub fn predecessor(&self, vertex: &V) -> Option<&V> {
        self.predecessors.get(vertex).map(|e| &e.from)
    }

    /// Edges from the source to `vertex`, or `None` if unreachable.
    pub fn path_edges(&self, vertex: &V) -> Option<Vec<Edge<V>>> {
        if !self.is_reachable(vertex) {
            return None;
        }
        let mut edges = Vec::new();
        let mut current = vertex;
        while let Some(edge) = self.predecessors.get(current) {
            edges.push(edge.clone());
            current = &edge.from;
        }
        edges.reverse();
        Some(edges)
    }

    /// Vertices from the source to `vertex`, or `None` if unreachable.
    pub fn path_to(&self, vertex: &V) -> Option<Vec<V>> {
        let edges = self.path_edges(vertex)?;
        let mut path = Vec::with_capacity(edges.len() + 1);
        path.push(self.source.clone());
        path.extend(edges.into_iter().map(|e| e.to));
        Some(path)
    }
}

/// Heap entry ordered by distance, then vertex index.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    vertex: usize,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.vertex.cmp(&other.vertex))
    }
}

/// Single-source shortest paths over non-negative weights.
///
/// Fails with `VertexNotFound` for an unknown source and `NegativeWeight`
/// (checked before any work) for a negative edge.
pub fn dijkstra<V: VertexId>(
    graph: &Graph<V>,
    source: &V,
    recorder: &mut StepRecorder<V>,
) -> GraphResult<ShortestPaths<V>> {
    let mut result = ShortestPaths {
        source: source.clone(),
        distances: BTreeMap::new(),
        predecessors: BTreeMap::new(),
    };
    if graph.is_empty() {
        return Ok(result);
    }
    graph.require_non_negative_weights()?;
    let adjacency = graph.adjacency();
    let src = adjacency
        .index_of(source)
        .ok_or_else(|| GraphError::vertex_not_found(source))?;

    let n = adjacency.len();
    let mut distance = vec![f64::INFINITY; n];
    let mut via: Vec<Option<(usize, f64)>> = vec![None; n];
    let mut settled: Vec<usize> = Vec::new();
    let mut heap = BinaryHeap::new();
    distance[src] = 0.0;
    heap.push(Reverse(QueueEntry {
        distance: 0.0,
        vertex: src,
    }));

    if let Some(step) = recorder.step(DIJKSTRA_TITLE) {
        step.subtitle(format!("Start from vertex {}", source))
            .aux("distances", Auxiliary::Values(vec![(source.clone(), 0.0)]))
            .push();
    }

    while let Some(Reverse(entry)) = heap.pop() {
        let u = entry.vertex;
        if entry.distance > distance[u] {
            log::trace!("skip stale entry for {}", adjacency.vertex(u));
            if let Some(step) = recorder.step(DIJKSTRA_TITLE) {
                step.subtitle(format!(
                    "Skip stale entry for {} ({} > {})",
                    adjacency.vertex(u),
                    entry.distance,
                    distance[u]
                ))
                .push();
            }
            continue;
        }

        settled.push(u);
        if let Some((p, w)) = via[u] {
            recorder.accept(&Edge::new(
                adjacency.vertex(p).clone(),
                adjacency.vertex(u).clone(),
                w,
            ));
        }
        if let Some(step) = recorder.step(DIJKSTRA_TITLE) {
            step.subtitle(format!(
                "Settle {} at distance {}",
                adjacency.vertex(u),
                distance[u]
            ))
            .aux(
                "settledVertices",
                Auxiliary::Vertices(adjacency.resolve(&settled)),
            )
            .push();
        }

        for &neighbor in adjacency.neighbors(u) {
            let v = neighbor.vertex;
            let candidate = distance[u] + neighbor.weight;
            let improved = candidate < distance[v];
            if improved {
                distance[v] = candidate;
                via[v] = Some((u, neighbor.weight));
                heap.push(Reverse(QueueEntry {
                    distance: candidate,
                    vertex: v,
                }));
            }
            if let Some(step) = recorder.step(DIJKSTRA_TITLE) {
                let edge = adjacency.edge(u, neighbor);
                let (disposition, subtitle) = if improved {
                    (
                        Disposition::Accepted,
                        format!("Relax {} -> {}: distance now {}", edge.from, edge.to, candidate),
                    )
                } else {
                    (
                        Disposition::Rejected,
                        format!(
                            "Relax {} -> {}: {} does not improve {}",
                            edge.from, edge.to, candidate, distance[v]
                        ),
                    )
                };
                step.subtitle(subtitle)
                    .considering(&edge, disposition)
                    .aux("distances", Auxiliary::Values(finite_distances(adjacency.vertices(), &distance)))
                    .push();
            }
        }
    }

    for (i, vertex) in adjacency.vertices().iter().enumerate() {
        result.distances.insert(vertex.clone(), distance[i]);
        if let Some((p, w)) = via[i] {
            result
                .predecessors
                .insert(vertex.clone(), Edge::new(adjacency.vertex(p).clone(), vertex.clone(), w));
        }
    }

    if let Some(step) = recorder.step(DIJKSTRA_TITLE) {
        step.subtitle(format!("Shortest distances from {}", source))
            .aux(
                "distances",
                Auxiliary::Values(finite_distances(adjacency.vertices(), &distance)),
            )
            .push();
    }

    log::debug!(
        "dijkstra from {}: settled {} of {} vertices",
        source,
        settled.len(),
        n
    );
    Ok(result)
}

fn finite_distances<V: VertexId>(vertices: &[V], distance: &[f64]) -> Vec<(V, f64)> {
    vertices
        .iter()
        .zip(distance)
        .filter(|(_, d)| d.is_finite())
        .map(|(v, &d)| (v.clone(), d))
        .collect()
}

//! Immutable step snapshots and the sequence that holds them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Edge;

use super::StepCursor;

/// What happened to the edge a step is considering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Under consideration, no decision yet.
    Pending,
    /// Taken into the result (tree edge, MST edge, improving relaxation).
    Accepted,
    /// Discarded (cycle-forming, already discovered, no improvement).
    Rejected,
}

impl Disposition {
    /// Return a human-readable name for this disposition.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// Algorithm-specific payload attached to a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Auxiliary<V> {
    /// A vertex list (visited set, queue contents, settled vertices).
    Vertices(Vec<V>),
    /// Per-vertex numbers (distances, timestamps).
    Values(Vec<(V, f64)>),
    /// A single number.
    Number(f64),
    /// A short label.
    Text(String),
}

/// One immutable snapshot of algorithm progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step<V> {
    /// Headline, e.g. the algorithm name.
    pub title: String,
    /// What this step is doing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Edges accepted so far, in acceptance order.
    pub accepted_edges: Vec<Edge<V>>,
    /// The edge under consideration, if any.
    pub considered_edge: Option<Edge<V>>,
    /// Fate of `considered_edge`.
    pub disposition: Option<Disposition>,
    /// Sum of accepted edge weights.
    pub running_total: f64,
    /// Per-algorithm extras keyed by name (`visitedVertices`, `distances`, ...).
    pub auxiliary: BTreeMap<&'static str, Auxiliary<V>>,
}

impl<V> Step<V> {
    /// Look up an auxiliary field.
    pub fn aux(&self, key: &str) -> Option<&Auxiliary<V>> {
        self.auxiliary.get(key)
    }

    /// The vertex list stored under `key`, if that field holds one.
    pub fn aux_vertices(&self, key: &str) -> Option<&[V]> {
        match self.auxiliary.get(key) {
            Some(Auxiliary::Vertices(vertices)) => Some(vertices),
            _ => None,
        }
    }
}

/// The ordered, append-only trace returned by an algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSequence<V> {
    steps: Vec<Step<V>>,
    truncated: bool,
}

impl<V> StepSequence<V> {
    pub(crate) fn new(steps: Vec<Step<V>>, truncated: bool) -> Self {
        Self { steps, truncated }
    }

    /// An empty sequence.
    pub fn empty() -> Self {
        Self::new(Vec::new(), false)
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if no steps were recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`.
    pub fn get(&self, index: usize) -> Option<&Step<V>> {
        self.steps.get(index)
    }

    /// The final step.
    pub fn last(&self) -> Option<&Step<V>> {
        self.steps.last()
    }

    /// All steps in order.
    pub fn as_slice(&self) -> &[Step<V>] {
        &self.steps
    }

    /// Iterate over steps in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Step<V>> {
        self.steps.iter()
    }

    /// True if recording stopped early because of a step limit.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// A read-only cursor positioned at the first step.
    pub fn cursor(&self) -> StepCursor<'_, V> {
        StepCursor::new(&self.steps)
    }

    /// Consume the sequence into its steps.
    pub fn into_steps(self) -> Vec<Step<V>> {
        self.steps
    }
}

impl<V> Default for StepSequence<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, V> IntoIterator for &'a StepSequence<V> {
    type Item = &'a Step<V>;
    type IntoIter = std::slice::Iter<'a, Step<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

//! The core edge struct.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GraphError, GraphResult, VertexId, UNIT_WEIGHT};

/// A weighted edge between two vertices.
///
/// Edges are directed (`from -> to`) unless the consuming algorithm treats
/// them as unordered pairs, as the MST engine does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<V> {
    /// Origin vertex.
    pub from: V,
    /// Destination vertex.
    pub to: V,
    /// Edge weight. Unweighted edges carry [`UNIT_WEIGHT`].
    pub weight: f64,
}

impl<V: VertexId> Edge<V> {
    /// Create a weighted edge.
    pub fn new(from: V, to: V, weight: f64) -> Self {
        Self { from, to, weight }
    }

    /// Create an edge with unit weight.
    pub fn unweighted(from: V, to: V) -> Self {
        Self::new(from, to, UNIT_WEIGHT)
    }

    /// The same edge with its endpoints swapped.
    pub fn reversed(&self) -> Self {
        Self::new(self.to.clone(), self.from.clone(), self.weight)
    }

    /// True if `from == to`.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Reject NaN and infinite weights.
    pub fn validate(&self) -> GraphResult<()> {
        if !self.weight.is_finite() {
            return Err(GraphError::InvalidWeight {
                from: self.from.to_string(),
                to: self.to.to_string(),
                weight: self.weight,
            });
        }
        Ok(())
    }

    /// Reject negative weights (shortest-path and MST precondition).
    pub fn require_non_negative(&self) -> GraphResult<()> {
        if self.weight < 0.0 {
            return Err(GraphError::NegativeWeight {
                from: self.from.to_string(),
                to: self.to.to_string(),
                weight: self.weight,
            });
        }
        Ok(())
    }
}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) = {}", self.from, self.to, self.weight)
    }
}

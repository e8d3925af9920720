//! Reads graph documents from JSON.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, GraphKind};
use crate::types::{Edge, GraphError, GraphResult, UNIT_WEIGHT};

/// One edge as written in a graph file. A missing weight means unit weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// On-disk graph document.
///
/// ```json
/// {"kind": "undirected", "vertices": ["A"], "edges": [{"from": "A", "to": "B", "weight": 4}]}
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphFile {
    #[serde(default)]
    pub kind: GraphKind,
    /// Extra vertices (edge endpoints are added automatically).
    #[serde(default)]
    pub vertices: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphFile {
    /// Validate and convert into a graph.
    pub fn into_graph(self) -> GraphResult<Graph<String>> {
        let mut graph = Graph::with_kind(self.kind);
        for vertex in self.vertices {
            if vertex.trim().is_empty() {
                return Err(GraphError::InvalidGraphFile(
                    "vertex name must not be empty".to_string(),
                ));
            }
            graph.add_vertex(vertex);
        }
        for (i, record) in self.edges.into_iter().enumerate() {
            if record.from.trim().is_empty() || record.to.trim().is_empty() {
                return Err(GraphError::InvalidGraphFile(format!(
                    "edge {} has an empty endpoint",
                    i
                )));
            }
            let weight = record.weight.unwrap_or(UNIT_WEIGHT);
            graph.add_edge(Edge::new(record.from, record.to, weight))?;
        }
        Ok(graph)
    }

    /// Snapshot an existing graph.
    pub fn from_graph(graph: &Graph<String>) -> Self {
        Self {
            kind: graph.kind(),
            vertices: graph.vertices().cloned().collect(),
            edges: graph
                .edges()
                .iter()
                .map(|e| EdgeRecord {
                    from: e.from.clone(),
                    to: e.to.clone(),
                    weight: Some(e.weight),
                })
                .collect(),
        }
    }
}

/// Reader for JSON graph files.
pub struct GraphReader;

impl GraphReader {
    /// Read a graph from a file.
    pub fn read_from_file(path: &Path) -> GraphResult<Graph<String>> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        let graph = Self::read_from(&mut reader)?;
        log::info!(
            "read {} ({} vertices, {} edges)",
            path.display(),
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Read a graph from any reader.
    pub fn read_from(reader: &mut impl Read) -> GraphResult<Graph<String>> {
        let file: GraphFile = serde_json::from_reader(reader)?;
        file.into_graph()
    }

    /// Parse a graph from a JSON string.
    pub fn from_json(json: &str) -> GraphResult<Graph<String>> {
        let file: GraphFile = serde_json::from_str(json)?;
        file.into_graph()
    }
}

//! Writes step traces as JSON documents.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::engine::{Algorithm, AlgorithmRun};
use crate::graph::Graph;
use crate::trace::Step;
use crate::types::{now_rfc3339, GraphResult, VertexId, TRACE_FORMAT_VERSION};

/// A trace file: run metadata plus the step sequence.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDocument<'a, V> {
    pub version: u32,
    pub algorithm: Algorithm,
    pub generated_at: String,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub truncated: bool,
    pub steps: &'a [Step<V>],
}

impl<'a, V: VertexId> TraceDocument<'a, V> {
    /// Describe `run` over `graph`.
    pub fn new<T>(graph: &Graph<V>, run: &'a AlgorithmRun<T, V>) -> Self {
        Self {
            version: TRACE_FORMAT_VERSION,
            algorithm: run.algorithm,
            generated_at: now_rfc3339(),
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            truncated: run.steps.is_truncated(),
            steps: run.steps.as_slice(),
        }
    }
}

/// Writer for trace files.
pub struct TraceWriter {
    pretty: bool,
}

impl TraceWriter {
    /// Create a writer producing compact JSON.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a writer producing indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Write a trace document to a file.
    pub fn write_to_file<V: VertexId + Serialize>(
        &self,
        document: &TraceDocument<'_, V>,
        path: &Path,
    ) -> GraphResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(document, &mut writer)?;
        writer.flush()?;
        log::info!(
            "wrote {} trace ({} steps) to {}",
            document.algorithm,
            document.steps.len(),
            path.display()
        );
        Ok(())
    }

    /// Write a trace document to any writer.
    pub fn write_to<V: VertexId + Serialize>(
        &self,
        document: &TraceDocument<'_, V>,
        writer: &mut impl Write,
    ) -> GraphResult<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, document)?;
        } else {
            serde_json::to_writer(&mut *writer, document)?;
        }
        Ok(())
    }
}

impl Default for TraceWriter {
    fn default() -> Self {
        Self::new()
    }
}

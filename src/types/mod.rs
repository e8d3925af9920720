//! All data types for the graph-trace library.

pub mod edge;
pub mod error;
pub mod vertex;

pub use edge::Edge;
pub use error::{GraphError, GraphResult};
pub use vertex::VertexId;

/// Weight given to edges added without an explicit weight.
pub const UNIT_WEIGHT: f64 = 1.0;

/// Trace file format version.
pub const TRACE_FORMAT_VERSION: u32 = 1;

/// Returns the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

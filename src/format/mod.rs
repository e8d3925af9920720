//! JSON file I/O: graph documents in, step traces out.

pub mod reader;
pub mod writer;

pub use reader::{EdgeRecord, GraphFile, GraphReader};
pub use writer::{TraceDocument, TraceWriter};

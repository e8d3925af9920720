//! Opaque vertex identifiers.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Bound satisfied by every type usable as a vertex identifier.
///
/// The algorithms only compare, hash and order identifiers; `Display` is used
/// for error messages and step subtitles. Strings and integers both qualify.
pub trait VertexId: Clone + Ord + Hash + Debug + Display + Send + Sync {}

impl<T> VertexId for T where T: Clone + Ord + Hash + Debug + Display + Send + Sync {}

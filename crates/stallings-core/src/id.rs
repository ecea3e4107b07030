//! Stable ID newtypes for graph entities.
//!
//! All IDs are distinct newtype wrappers over `u32`, providing type safety
//! so that a canonical vertex number cannot be accidentally used where a
//! lattice-level graph identifier is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical vertex number inside one [`Graph`](crate::graph::Graph).
///
/// Assigned by the breadth-first canonical traversal; `VertexId(0)` is the
/// first root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

/// Identifier of one graph inside a [`Lattice`](crate::lattice::Lattice).
///
/// `GraphId(0)` is always the origin graph the lattice was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphId(pub u32);

impl VertexId {
    /// The id as a `usize` index into the canonical vertex table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl GraphId {
    /// The id as a `usize` index into the lattice's graph list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

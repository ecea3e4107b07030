//! Record types for the flattened exports.
//!
//! Vertex and graph identifiers are the canonical integers assigned by the
//! core's traversal orders, so repeated exports of the same value produce
//! identical rows.

use serde::{Deserialize, Serialize};

/// One undirected edge of a graph, emitted in the non-inverted label
/// direction only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    /// Canonical number of the source vertex.
    pub source: u32,
    /// Canonical number of the target vertex.
    pub target: u32,
    /// Generator name, without orientation.
    pub label: String,
}

/// One parent-to-child link of an extension lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRow {
    /// Lattice id of the parent graph.
    pub parent: u32,
    /// Lattice id of the child graph.
    pub child: u32,
}

/// Per-graph attributes of an extension lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrRow {
    /// Lattice id of the graph.
    pub id: u32,
    /// Euler characteristic (vertices minus edges).
    pub chi: i64,
    /// Whether the graph is a proper algebraic descendant of the origin.
    pub algebraic: bool,
}

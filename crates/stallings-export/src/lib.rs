//! Flattening of graphs and extension lattices into edge-list and
//! attribute records, for visualization tooling.
//!
//! Plain serialization with no round-trip requirement: nothing here feeds
//! back into the engine. Records are `serde`-serializable row structs;
//! writers emit CSV (header row included) to any `io::Write`, and JSON via
//! `serde_json`.
//!
//! # Modules
//!
//! - [`error`]: ExportError covering I/O and serialization failures
//! - [`types`]: EdgeRow, LinkRow, AttrRow record types
//! - [`edges`]: Graph -> edge-list flattening and CSV writer
//! - [`lattice`]: Lattice -> link/attribute flattening and CSV writers

pub mod edges;
pub mod error;
pub mod lattice;
pub mod types;

// Re-export key types for ergonomic use.
pub use edges::{graph_edges, write_edges_csv};
pub use error::ExportError;
pub use lattice::{lattice_attrs, lattice_links, write_attrs_csv, write_links_csv};
pub use types::{AttrRow, EdgeRow, LinkRow};

use serde::Serialize;

/// Serializes any row collection as pretty JSON.
pub fn to_json<T: Serialize>(rows: &T) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

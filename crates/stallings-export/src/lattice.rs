//! Lattice-to-record flattening: parent/child links plus a parallel
//! per-graph attribute table, keyed by the lattice's integer ids.

use std::io::Write;

use stallings_core::{GraphId, Lattice};

use crate::error::ExportError;
use crate::types::{AttrRow, LinkRow};

/// Flattens the parent-to-child links of a lattice.
pub fn lattice_links(lattice: &Lattice) -> Vec<LinkRow> {
    lattice
        .links()
        .iter()
        .map(|link| LinkRow {
            parent: link.parent.0,
            child: link.child.0,
        })
        .collect()
}

/// Flattens the per-graph attribute table, origin included as id 0.
pub fn lattice_attrs(lattice: &Lattice) -> Vec<AttrRow> {
    lattice
        .graphs()
        .iter()
        .enumerate()
        .map(|(i, graph)| AttrRow {
            id: i as u32,
            chi: graph.euler_characteristic(),
            algebraic: lattice.is_algebraic(GraphId(i as u32)),
        })
        .collect()
}

/// Writes link rows as CSV with a header.
pub fn write_links_csv<W: Write>(out: &mut W, rows: &[LinkRow]) -> Result<(), ExportError> {
    writeln!(out, "parent,child")?;
    for row in rows {
        writeln!(out, "{},{}", row.parent, row.child)?;
    }
    Ok(())
}

/// Writes attribute rows as CSV with a header.
pub fn write_attrs_csv<W: Write>(out: &mut W, rows: &[AttrRow]) -> Result<(), ExportError> {
    writeln!(out, "id,chi,algebraic")?;
    for row in rows {
        writeln!(out, "{},{},{}", row.id, row.chi, row.algebraic)?;
    }
    Ok(())
}

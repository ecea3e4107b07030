//! Graph-to-edge-list flattening.

use std::io::Write;

use stallings_core::Graph;

use crate::error::ExportError;
use crate::types::EdgeRow;

/// Flattens a graph to one row per undirected edge.
///
/// Every undirected edge is stored once per endpoint-direction pair in the
/// canonical vertex table, with exactly one of the two entries carrying the
/// non-inverted label. Emitting only that direction yields exactly
/// `graph.edge_count()` rows, in canonical vertex order.
pub fn graph_edges(graph: &Graph) -> Vec<EdgeRow> {
    let mut rows = Vec::with_capacity(graph.edge_count());
    for (source, vertex) in graph.vertices().iter().enumerate() {
        for (label, target) in vertex.neighbors() {
            if !label.is_inverted() {
                rows.push(EdgeRow {
                    source: source as u32,
                    target: target.0,
                    label: label.name().to_string(),
                });
            }
        }
    }
    debug_assert_eq!(rows.len(), graph.edge_count());
    rows
}

/// Writes edge rows as CSV with a header.
pub fn write_edges_csv<W: Write>(out: &mut W, rows: &[EdgeRow]) -> Result<(), ExportError> {
    writeln!(out, "source,target,label")?;
    for row in rows {
        writeln!(out, "{},{},{}", row.source, row.target, row.label)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stallings_core::{Symbol, Word};

    fn wedge() -> Graph {
        Graph::from_words(&[
            Word::new(vec![Symbol::new("x")]),
            Word::new(vec![Symbol::new("y")]),
        ])
    }

    #[test]
    fn one_row_per_undirected_edge() {
        let g = wedge();
        let rows = graph_edges(&g);
        assert_eq!(rows.len(), g.edge_count());
        assert_eq!(
            rows,
            vec![
                EdgeRow {
                    source: 0,
                    target: 0,
                    label: "x".into()
                },
                EdgeRow {
                    source: 0,
                    target: 0,
                    label: "y".into()
                },
            ]
        );
    }

    #[test]
    fn inverted_letters_still_yield_positive_rows() {
        // A single x^-1 loop folds to the same graph as an x loop; the
        // emitted row carries the positive direction.
        let g = Graph::from_words(&[Word::new(vec![Symbol::new("x").inverse()])]);
        let rows = graph_edges(&g);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "x");
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let rows = graph_edges(&wedge());
        let mut buf = Vec::new();
        write_edges_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "source,target,label\n0,0,x\n0,0,y\n");
    }

    #[test]
    fn empty_graph_exports_header_only() {
        let rows = graph_edges(&Graph::trivial());
        assert!(rows.is_empty());
        let mut buf = Vec::new();
        write_edges_csv(&mut buf, &rows).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "source,target,label\n");
    }

    #[test]
    fn json_rendering_is_valid() {
        let rows = graph_edges(&wedge());
        let json = crate::to_json(&rows).unwrap();
        let back: Vec<EdgeRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rows);
    }
}

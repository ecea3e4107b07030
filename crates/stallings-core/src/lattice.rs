//! The one-point-extension closure and its extremal invariant.
//!
//! [`Lattice::build`] starts from an origin graph and repeatedly expands
//! [`Graph::children`] on every newly discovered graph, deduplicating by
//! structural hash across the whole closure. Termination is guaranteed:
//! every child has strictly fewer vertices than its parent, so depth is
//! bounded by the origin's vertex count. The enumeration can still be
//! exponential in degenerate inputs; callers needing bounded latency must
//! impose an external cap.
//!
//! Each discovered graph other than the origin carries an **algebraic**
//! flag, initialized `true`. A parent-child link whose Euler characteristic
//! drops by exactly one marks the child non-algebraic, permanently: any
//! qualifying link wins, regardless of other links reaching the same child.
//! The extremal invariant is the maximum Euler characteristic among the
//! flagged proper descendants.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::Graph;
use crate::hash::StructuralHash;
use crate::id::GraphId;

/// One parent-to-child edge of the extension lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The graph the child was generated from.
    pub parent: GraphId,
    /// The generated one-point extension.
    pub child: GraphId,
}

/// The full descendant set of one graph, with links and algebraic flags.
///
/// `GraphId(0)` is always the origin. Ids are assigned in discovery order,
/// which is deterministic for a fixed origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lattice {
    graphs: Vec<Graph>,
    links: Vec<Link>,
    algebraic: Vec<bool>,
}

impl Lattice {
    /// Computes the closure below `origin`.
    pub fn build(origin: &Graph) -> Lattice {
        let mut graphs = vec![origin.copy()];
        let mut index: IndexMap<StructuralHash, usize> = IndexMap::new();
        index.insert(origin.structural_hash(), 0);
        let mut links = Vec::new();
        let mut algebraic = vec![true];

        let mut cursor = 0;
        while cursor < graphs.len() {
            let parent_chi = graphs[cursor].euler_characteristic();
            let kids = graphs[cursor].children();
            for child in kids {
                let child_chi = child.euler_characteristic();
                let id = match index.get(&child.structural_hash()) {
                    Some(&id) => id,
                    None => {
                        let id = graphs.len();
                        index.insert(child.structural_hash(), id);
                        graphs.push(child);
                        algebraic.push(true);
                        id
                    }
                };
                links.push(Link {
                    parent: GraphId(cursor as u32),
                    child: GraphId(id as u32),
                });
                if parent_chi - child_chi == 1 {
                    algebraic[id] = false;
                }
            }
            cursor += 1;
        }

        Lattice {
            graphs,
            links,
            algebraic,
        }
    }

    /// The graph the lattice was built from.
    pub fn origin(&self) -> &Graph {
        &self.graphs[0]
    }

    /// All graphs of the closure, origin first, in discovery order.
    pub fn graphs(&self) -> &[Graph] {
        &self.graphs
    }

    /// One graph by id. Panics on an id from another lattice.
    pub fn graph(&self, id: GraphId) -> &Graph {
        &self.graphs[id.index()]
    }

    /// Every parent-to-child link, in discovery order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Number of graphs in the closure, the origin included.
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// A lattice always contains at least its origin.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `id` is a proper algebraic descendant. The origin is not a
    /// proper descendant and reports `false`.
    pub fn is_algebraic(&self, id: GraphId) -> bool {
        id.index() != 0 && self.algebraic[id.index()]
    }

    /// Maximum Euler characteristic among proper algebraic descendants, or
    /// `None` when no such descendant exists.
    pub fn extremal_invariant(&self) -> Option<i64> {
        self.graphs
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(i, _)| self.algebraic[*i])
            .map(|(_, g)| g.euler_characteristic())
            .max()
    }

    /// The ids of the proper algebraic descendants attaining the extremal
    /// invariant. Empty exactly when the invariant is `None`.
    pub fn critical_set(&self) -> Vec<GraphId> {
        let Some(best) = self.extremal_invariant() else {
            return Vec::new();
        };
        self.graphs
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(i, g)| self.algebraic[*i] && g.euler_characteristic() == best)
            .map(|(i, _)| GraphId(i as u32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;
    use crate::word::Word;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn y() -> Symbol {
        Symbol::new("y")
    }

    #[test]
    fn wedge_has_no_proper_descendants() {
        let wedge = Graph::from_words(&[Word::new(vec![x()]), Word::new(vec![y()])]);
        let lattice = wedge.descendants();
        assert_eq!(lattice.len(), 1);
        assert!(lattice.links().is_empty());
        assert_eq!(lattice.extremal_invariant(), None);
        assert!(lattice.critical_set().is_empty());
    }

    #[test]
    fn chi_drop_of_one_marks_the_child_non_algebraic() {
        // x*y folds to a 2-vertex cycle (chi 0); its only child is the
        // 2-loop wedge (chi -1), a drop of exactly one.
        let g = Graph::from_words(&[Word::new(vec![x(), y()])]);
        let lattice = g.descendants();
        assert_eq!(lattice.len(), 2);
        assert_eq!(lattice.links().len(), 1);
        assert_eq!(lattice.links()[0].parent, GraphId(0));
        assert_eq!(lattice.links()[0].child, GraphId(1));
        assert!(!lattice.is_algebraic(GraphId(1)));
        assert_eq!(lattice.extremal_invariant(), None);
        assert!(lattice.critical_set().is_empty());
    }

    #[test]
    fn square_generator_has_an_algebraic_descendant() {
        // x^2 folds to a 2-vertex cycle (chi 0); merging its vertices gives
        // the x loop (chi 0), a drop of zero, so the child stays algebraic.
        let square = Graph::from_words(&[Word::new(vec![x(), x()])]);
        let single = Graph::from_words(&[Word::new(vec![x()])]);
        let lattice = square.descendants();
        assert_eq!(lattice.len(), 2);
        assert!(lattice.is_algebraic(GraphId(1)));
        assert_eq!(lattice.extremal_invariant(), Some(0));
        assert_eq!(lattice.critical_set(), vec![GraphId(1)]);
        assert_eq!(lattice.graph(GraphId(1)), &single);
    }

    #[test]
    fn origin_is_not_a_proper_descendant() {
        let g = Graph::from_words(&[Word::new(vec![x(), x()])]);
        let lattice = g.descendants();
        assert!(!lattice.is_algebraic(GraphId(0)));
        assert_eq!(lattice.origin(), &g);
    }

    #[test]
    fn closure_terminates_and_shrinks() {
        let g = Graph::from_words(&[Word::new(vec![
            x(),
            y(),
            x().inverse(),
            y().inverse(),
        ])]);
        let lattice = g.descendants();
        // Every proper descendant is strictly smaller than the origin.
        for graph in &lattice.graphs()[1..] {
            assert!(graph.vertex_count() < g.vertex_count());
        }
        // Every link's child is strictly smaller than its parent.
        for link in lattice.links() {
            assert!(
                lattice.graph(link.child).vertex_count()
                    < lattice.graph(link.parent).vertex_count()
            );
        }
    }

    #[test]
    fn repeated_calls_reuse_the_cache() {
        let g = Graph::from_words(&[Word::new(vec![x(), x()])]);
        let first = g.descendants() as *const Lattice;
        let second = g.descendants() as *const Lattice;
        assert_eq!(first, second);
        assert_eq!(g.extremal_invariant(), Some(0));
        assert_eq!(g.extremal_invariant(), Some(0));
    }

    #[test]
    fn critical_set_on_the_graph_returns_the_attaining_graphs() {
        let square = Graph::from_words(&[Word::new(vec![x(), x()])]);
        let single = Graph::from_words(&[Word::new(vec![x()])]);
        let critical = square.critical_set();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0], &single);
    }
}

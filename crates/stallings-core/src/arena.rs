//! Union-find folding arena.
//!
//! [`FoldArena`] is the mutable structure in which folding happens: a
//! fixed-capacity slab of vertex slots, a union-find over slot indices
//! (petgraph's `UnionFind`, union by rank with path compression), and a
//! per-slot neighbor list. Every construction path in this crate knows its
//! worst-case vertex count up front, so the arena never grows.
//!
//! # Representatives
//!
//! Two raw indices denote the same logical vertex iff their union-find
//! representatives coincide. Neighbor lists are meaningful only at
//! representatives, and stored targets may be stale raw indices -- every
//! read resolves targets through [`FoldArena::find`]. This is what makes
//! merge cheap: back-edges into an absorbed slot keep pointing at the old
//! index and resolve correctly through the union-find.
//!
//! # Folding
//!
//! [`FoldArena::set_neighbor`] installs a labeled edge together with its
//! mirror (`v --g--> w` implies `w --g^-1--> v`). If either endpoint already
//! carries an edge with the same label, the two targets are merged instead;
//! [`FoldArena::merge`] drains the absorbed slot's neighbor list into the
//! survivor, enqueueing further merges on label conflicts. Repeated until
//! the worklist is empty, this is the classical folding algorithm. It cannot
//! fail and always terminates: every union strictly decreases the number of
//! distinct representatives.

use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::symbol::Symbol;

/// Neighbor entries of one slot. The alphabet is small; most vertices carry
/// at most four incident labels.
type NeighborList = SmallVec<[(Symbol, u32); 4]>;

/// Fixed-capacity folding arena.
#[derive(Debug, Clone)]
pub struct FoldArena {
    uf: UnionFind<u32>,
    slots: Vec<NeighborList>,
}

impl FoldArena {
    /// Creates an arena with `capacity` singleton vertices and no edges.
    pub fn new(capacity: usize) -> Self {
        FoldArena {
            uf: UnionFind::new(capacity),
            slots: vec![NeighborList::new(); capacity],
        }
    }

    /// Number of slots (live and absorbed).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Representative of `v`, with path compression.
    pub fn find(&mut self, v: u32) -> u32 {
        self.uf.find_mut(v)
    }

    /// The representative of `v`'s neighbor along `label`, if any.
    pub fn neighbor(&mut self, v: u32, label: &Symbol) -> Option<u32> {
        let rv = self.find(v);
        let raw = self.slots[rv as usize]
            .iter()
            .find(|(g, _)| g == label)
            .map(|(_, w)| *w)?;
        Some(self.find(raw))
    }

    /// All neighbors of `v`, targets resolved to current representatives.
    pub fn resolved_neighbors(&mut self, v: u32) -> Vec<(Symbol, u32)> {
        let rv = self.find(v);
        let entries: Vec<(Symbol, u32)> = self.slots[rv as usize].iter().cloned().collect();
        entries
            .into_iter()
            .map(|(g, raw)| {
                let target = self.find(raw);
                (g, target)
            })
            .collect()
    }

    /// Installs the edge `v --label--> w` and its mirror, folding on
    /// conflict.
    ///
    /// If `v` already has a `label`-neighbor `x`, the edge is not duplicated:
    /// `x` and `w` are merged instead (two images of the same labeled edge
    /// must share their target). The mirror direction applies the same rule,
    /// which also restores co-determinism when two distinct sources carry
    /// `label` into `w`.
    pub fn set_neighbor(&mut self, v: u32, label: &Symbol, w: u32) {
        let rv = self.find(v);
        let rw = self.find(w);
        if let Some(existing) = self.neighbor(rv, label) {
            self.merge(existing, rw);
            return;
        }
        self.slots[rv as usize].push((label.clone(), rw));
        let mirror = label.inverse();
        if let Some(existing_back) = self.neighbor(rw, &mirror) {
            self.merge(existing_back, rv);
        } else {
            self.slots[rw as usize].push((mirror, rv));
        }
    }

    /// Installs a raw neighbor entry without conflict checks or mirroring.
    ///
    /// Only for rebuilding an arena from an already-folded canonical graph,
    /// where both directions are enumerated and no conflicts exist.
    pub(crate) fn install_raw(&mut self, v: u32, label: Symbol, w: u32) {
        self.slots[v as usize].push((label, w));
    }

    /// Merges the logical vertices of `a` and `b`, folding to completion.
    ///
    /// Worklist-driven: each union drains the absorbed representative's
    /// neighbor list into the survivor; a label already present on the
    /// survivor with a different target enqueues a further merge. The
    /// absorbed slot is cleared so stale reads cannot see its entries.
    pub fn merge(&mut self, a: u32, b: u32) {
        let mut pending: Vec<(u32, u32)> = vec![(a, b)];
        while let Some((a, b)) = pending.pop() {
            let ra = self.find(a);
            let rb = self.find(b);
            if ra == rb {
                continue;
            }
            self.uf.union(ra, rb);
            let keep = self.find(ra);
            let lose = if keep == ra { rb } else { ra };

            let absorbed = std::mem::take(&mut self.slots[lose as usize]);
            for (label, raw_target) in absorbed {
                let target = self.find(raw_target);
                let existing = self.slots[keep as usize]
                    .iter()
                    .find(|(g, _)| *g == label)
                    .map(|(_, t)| *t);
                match existing {
                    Some(raw_existing) => {
                        let existing = self.find(raw_existing);
                        if existing != target {
                            pending.push((existing, target));
                        }
                    }
                    None => self.slots[keep as usize].push((label, target)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Symbol {
        Symbol::new("x")
    }

    fn y() -> Symbol {
        Symbol::new("y")
    }

    #[test]
    fn set_neighbor_installs_mirror_edge() {
        let mut arena = FoldArena::new(2);
        arena.set_neighbor(0, &x(), 1);
        assert_eq!(arena.neighbor(0, &x()), Some(1));
        assert_eq!(arena.neighbor(1, &x().inverse()), Some(0));
    }

    #[test]
    fn loop_edge_carries_both_orientations() {
        let mut arena = FoldArena::new(1);
        arena.set_neighbor(0, &x(), 0);
        assert_eq!(arena.neighbor(0, &x()), Some(0));
        assert_eq!(arena.neighbor(0, &x().inverse()), Some(0));
    }

    #[test]
    fn conflicting_targets_are_merged() {
        // 0 --x--> 1 and 0 --x--> 2 forces 1 == 2.
        let mut arena = FoldArena::new(3);
        arena.set_neighbor(0, &x(), 1);
        arena.set_neighbor(0, &x(), 2);
        assert_eq!(arena.find(1), arena.find(2));
        assert_eq!(arena.neighbor(0, &x()), Some(arena.find(1)));
    }

    #[test]
    fn conflicting_sources_are_merged() {
        // 1 --x--> 0 and 2 --x--> 0 forces 1 == 2 (co-determinism).
        let mut arena = FoldArena::new(3);
        arena.set_neighbor(1, &x(), 0);
        arena.set_neighbor(2, &x(), 0);
        assert_eq!(arena.find(1), arena.find(2));
    }

    #[test]
    fn merge_transfers_neighbors() {
        let mut arena = FoldArena::new(4);
        arena.set_neighbor(0, &x(), 1);
        arena.set_neighbor(2, &y(), 3);
        arena.merge(0, 2);
        let rep = arena.find(0);
        assert_eq!(arena.find(2), rep);
        assert_eq!(arena.neighbor(rep, &x()), Some(arena.find(1)));
        assert_eq!(arena.neighbor(rep, &y()), Some(arena.find(3)));
    }

    #[test]
    fn merge_cascades_through_folding() {
        // Two x-paths of length 2 from a shared source: merging the far
        // endpoints is forced once the near ones collide.
        let mut arena = FoldArena::new(5);
        arena.set_neighbor(0, &x(), 1);
        arena.set_neighbor(1, &y(), 2);
        arena.set_neighbor(0, &x(), 3);
        arena.set_neighbor(3, &y(), 4);
        // set_neighbor already folded 1 == 3, hence 2 == 4.
        assert_eq!(arena.find(1), arena.find(3));
        assert_eq!(arena.find(2), arena.find(4));
    }

    #[test]
    fn stale_handles_resolve_through_representatives() {
        let mut arena = FoldArena::new(3);
        arena.set_neighbor(0, &x(), 1);
        arena.merge(1, 2);
        // Querying through the pre-merge handle still reaches the survivor.
        assert_eq!(arena.neighbor(0, &x()), Some(arena.find(2)));
        assert_eq!(arena.neighbor(2, &x().inverse()), Some(0));
    }

    #[test]
    fn merge_is_a_noop_on_same_class() {
        let mut arena = FoldArena::new(2);
        arena.set_neighbor(0, &x(), 1);
        arena.merge(0, 0);
        arena.merge(1, 1);
        assert_eq!(arena.neighbor(0, &x()), Some(1));
    }
}

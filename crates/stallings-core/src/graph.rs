//! Canonical Stallings graphs: construction, comparison, and algebra.
//!
//! A [`Graph`] is the immutable canonical value produced by folding: a root
//! list, a compact vertex table in canonical breadth-first order, the edge
//! count, and a blake3 structural hash. All mutation happens inside a
//! [`FoldArena`]; [`canonicalize`] turns a folded arena plus a root list
//! into a `Graph` in one step, so no observer ever sees a graph mid-merge.
//!
//! # Identity
//!
//! Two graphs are equal iff their structural hashes match. Because the
//! canonical numbering is determined by root order and sorted edge labels
//! alone (folded graphs are deterministic), equal hashes mean isomorphic
//! rooted labeled graphs, modulo the documented collision risk.
//!
//! # Order
//!
//! [`Graph::eta`] searches for a total label- and root-respecting
//! homomorphism into another graph; its existence realizes subgroup
//! containment for the subgroups the graphs represent.

use std::cell::OnceCell;
use std::collections::VecDeque;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::arena::FoldArena;
use crate::error::CoreError;
use crate::hash::{CanonicalHasher, StructuralHash};
use crate::id::VertexId;
use crate::lattice::Lattice;
use crate::symbol::Symbol;
use crate::word::Word;

/// Neighbor entries of one canonical vertex, sorted by label.
///
/// Both directions of every undirected edge are present across the table:
/// `v --g--> w` always coexists with `w --g^-1--> v` (a loop carries both
/// entries on the same vertex), so the edge count is half the total number
/// of entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexData {
    neighbors: SmallVec<[(Symbol, VertexId); 4]>,
}

impl VertexData {
    /// All neighbor entries, sorted by label.
    pub fn neighbors(&self) -> &[(Symbol, VertexId)] {
        &self.neighbors
    }

    /// The unique neighbor along `label`, if any (folded graphs are
    /// deterministic).
    pub fn neighbor(&self, label: &Symbol) -> Option<VertexId> {
        self.neighbors
            .binary_search_by(|(g, _)| g.cmp(label))
            .ok()
            .map(|i| self.neighbors[i].1)
    }

    /// Number of incident labeled directions.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

/// A folded, rooted, labeled graph in canonical form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    roots: Vec<VertexId>,
    vertices: Vec<VertexData>,
    edge_count: usize,
    hash: StructuralHash,
    /// Write-once descendant cache; derived state, never serialized.
    #[serde(skip)]
    lattice: OnceCell<Lattice>,
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Graph {}

impl std::hash::Hash for Graph {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl Graph {
    /// The graph of the trivial subgroup: a single isolated root.
    pub fn trivial() -> Graph {
        let mut arena = FoldArena::new(1);
        canonicalize(&mut arena, &[0])
    }

    /// Folds a collection of words into the Stallings graph of the subgroup
    /// they generate.
    ///
    /// Each word lays down a fresh edge path from a single shared root, and
    /// the path's end is merged back into the root to close the loop.
    /// Conflicting labels fold as they appear, so the result is canonical
    /// regardless of word order. The empty collection yields
    /// [`Graph::trivial`].
    pub fn from_words(words: &[Word]) -> Graph {
        let capacity: usize = 1 + words.iter().map(Word::len).sum::<usize>();
        let mut arena = FoldArena::new(capacity);
        let root: u32 = 0;
        let mut next: u32 = 1;
        for word in words {
            let mut cursor = root;
            for sym in word.symbols() {
                let fresh = next;
                next += 1;
                arena.set_neighbor(cursor, sym, fresh);
                // set_neighbor may have folded the fresh slot into an
                // existing vertex; continue from the surviving one.
                cursor = arena.find(fresh);
            }
            arena.merge(cursor, root);
        }
        canonicalize(&mut arena, &[root])
    }

    // -----------------------------------------------------------------------
    // Read-only accessors
    // -----------------------------------------------------------------------

    /// The root list, in positional order.
    pub fn roots(&self) -> &[VertexId] {
        &self.roots
    }

    /// The canonical vertex table.
    pub fn vertices(&self) -> &[VertexData] {
        &self.vertices
    }

    /// One canonical vertex. Panics on an id from another graph -- vertex
    /// ids are only meaningful within the graph that issued them.
    pub fn vertex(&self, id: VertexId) -> &VertexData {
        &self.vertices[id.index()]
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Euler characteristic: vertices minus edges.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edge_count as i64
    }

    /// The canonical structural hash.
    pub fn structural_hash(&self) -> StructuralHash {
        self.hash
    }

    // -----------------------------------------------------------------------
    // Homomorphism search and the subgroup order
    // -----------------------------------------------------------------------

    /// Searches for a total label- and root-respecting homomorphism from
    /// `self` into `other`.
    ///
    /// Roots map positionally; a repeated self-root demanding two different
    /// images fails immediately. The map extends by breadth-first search:
    /// whenever `v` maps to `v'` and `v` has a `g`-edge to `w`, the image of
    /// `w` must be `v'`'s `g`-neighbor -- which is unique because `other` is
    /// folded, and whose absence means no homomorphism exists. The result is
    /// either a complete vertex mapping or `None`, never a partial map.
    /// Runs in time linear in `self`.
    pub fn eta(&self, other: &Graph) -> Option<Vec<VertexId>> {
        if self.roots.len() != other.roots.len() {
            return None;
        }
        let mut image: Vec<Option<VertexId>> = vec![None; self.vertices.len()];
        let mut queue: VecDeque<VertexId> = VecDeque::new();

        for (sr, or) in self.roots.iter().zip(other.roots.iter()) {
            match image[sr.index()] {
                None => {
                    image[sr.index()] = Some(*or);
                    queue.push_back(*sr);
                }
                Some(assigned) if assigned != *or => return None,
                Some(_) => {}
            }
        }

        while let Some(v) = queue.pop_front() {
            let v_image = image[v.index()].expect("queued vertex has an image");
            for (label, w) in self.vertices[v.index()].neighbors() {
                let target_image = other.vertex(v_image).neighbor(label)?;
                match image[w.index()] {
                    None => {
                        image[w.index()] = Some(target_image);
                        queue.push_back(*w);
                    }
                    Some(assigned) if assigned != target_image => return None,
                    Some(_) => {}
                }
            }
        }

        // Every canonical vertex is root-reachable, so the map is total.
        Some(
            image
                .into_iter()
                .map(|img| img.expect("canonical graphs are root-reachable"))
                .collect(),
        )
    }

    /// The subgroup order: `self` is contained in `other` iff a
    /// homomorphism `self -> other` exists.
    pub fn is_contained_in(&self, other: &Graph) -> bool {
        self.eta(other).is_some()
    }

    /// Reverse of [`Graph::is_contained_in`].
    pub fn contains(&self, other: &Graph) -> bool {
        other.is_contained_in(self)
    }

    // -----------------------------------------------------------------------
    // Algebra: copy, combine, repeat
    // -----------------------------------------------------------------------

    /// Rebuilds an isomorphic graph with entirely fresh storage and the
    /// same root ordering. `copy(A) == A` by structural hash.
    pub fn copy(&self) -> Graph {
        let mut arena = self.to_arena(0);
        let roots: Vec<u32> = self.roots.iter().map(|r| r.0).collect();
        canonicalize(&mut arena, &roots)
    }

    /// Disjoint combination: fresh copies of both operands with the root
    /// lists concatenated.
    ///
    /// No folding happens across the operands beyond renumbering -- the
    /// result is the multi-rooted intermediate used to build joins, not a
    /// group-theoretic sum.
    pub fn combine(&self, other: &Graph) -> Graph {
        let offset = self.vertices.len() as u32;
        let mut arena = FoldArena::new(self.vertices.len() + other.vertices.len());
        self.install_into(&mut arena, 0);
        other.install_into(&mut arena, offset);
        let roots: Vec<u32> = self
            .roots
            .iter()
            .map(|r| r.0)
            .chain(other.roots.iter().map(|r| r.0 + offset))
            .collect();
        canonicalize(&mut arena, &roots)
    }

    /// `count`-fold repetition: `self` for one, `repeat(count - 1)`
    /// combined with `self` otherwise. Counts below one are rejected.
    pub fn repeat(&self, count: i64) -> Result<Graph, CoreError> {
        if count < 1 {
            return Err(CoreError::InvalidRepeat { count });
        }
        if count == 1 {
            return Ok(self.copy());
        }
        Ok(self.repeat(count - 1)?.combine(self))
    }

    // -----------------------------------------------------------------------
    // One-point extensions
    // -----------------------------------------------------------------------

    /// Enumerates the distinct graphs obtained by identifying one pair of
    /// vertices and re-folding.
    ///
    /// For every unordered pair of distinct vertex numbers, a fresh
    /// index-preserving arena copy is taken (so the pair locates its own
    /// images), the pair is merged, and the result canonicalized.
    /// Duplicates are suppressed by structural hash; discovery order makes
    /// the result deterministic. Every child has strictly fewer vertices
    /// than `self`.
    pub fn children(&self) -> Vec<Graph> {
        let n = self.vertices.len() as u32;
        let roots: Vec<u32> = self.roots.iter().map(|r| r.0).collect();
        let mut seen: IndexMap<StructuralHash, Graph> = IndexMap::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let mut arena = self.to_arena(0);
                arena.merge(i, j);
                let child = canonicalize(&mut arena, &roots);
                seen.entry(child.structural_hash()).or_insert(child);
            }
        }
        seen.into_values().collect()
    }

    // -----------------------------------------------------------------------
    // Descendant closure (cached)
    // -----------------------------------------------------------------------

    /// The full one-point-extension closure below this graph, computed once
    /// and cached for the lifetime of this instance.
    pub fn descendants(&self) -> &Lattice {
        self.lattice.get_or_init(|| Lattice::build(self))
    }

    /// Maximum Euler characteristic among proper algebraic descendants, or
    /// `None` when no such descendant exists.
    pub fn extremal_invariant(&self) -> Option<i64> {
        self.descendants().extremal_invariant()
    }

    /// The proper algebraic descendants whose Euler characteristic attains
    /// [`Graph::extremal_invariant`].
    pub fn critical_set(&self) -> Vec<&Graph> {
        let lattice = self.descendants();
        lattice
            .critical_set()
            .into_iter()
            .map(|id| lattice.graph(id))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Arena plumbing
    // -----------------------------------------------------------------------

    /// Rebuilds a folding arena holding this graph's structure at
    /// `offset..offset + n`. Both edge directions are already enumerated in
    /// the vertex table, so entries are installed verbatim.
    fn to_arena(&self, offset: u32) -> FoldArena {
        let mut arena = FoldArena::new(offset as usize + self.vertices.len());
        self.install_into(&mut arena, offset);
        arena
    }

    fn install_into(&self, arena: &mut FoldArena, offset: u32) {
        for (i, vertex) in self.vertices.iter().enumerate() {
            for (label, w) in vertex.neighbors() {
                arena.install_raw(i as u32 + offset, label.clone(), w.0 + offset);
            }
        }
    }
}

/// Collapses a folded arena into a canonical [`Graph`].
///
/// This is the single re-hashing step invoked after any structural
/// mutation: it recomputes the root-reachable vertex set, renumbers it by
/// breadth-first traversal (roots in positional order, labels in sorted
/// order -- canonical because folded graphs are deterministic), counts
/// edges, and digests the triples.
pub(crate) fn canonicalize(arena: &mut FoldArena, roots: &[u32]) -> Graph {
    let capacity = arena.capacity();
    let mut number: Vec<Option<u32>> = vec![None; capacity];
    let mut order: Vec<u32> = Vec::new();
    let mut queue: VecDeque<u32> = VecDeque::new();

    let mut root_ids = Vec::with_capacity(roots.len());
    for &r in roots {
        let rep = arena.find(r);
        let id = match number[rep as usize] {
            Some(id) => id,
            None => {
                let id = order.len() as u32;
                number[rep as usize] = Some(id);
                order.push(rep);
                queue.push_back(rep);
                id
            }
        };
        root_ids.push(VertexId(id));
    }

    while let Some(v) = queue.pop_front() {
        let mut entries = arena.resolved_neighbors(v);
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, w) in entries {
            if number[w as usize].is_none() {
                number[w as usize] = Some(order.len() as u32);
                order.push(w);
                queue.push_back(w);
            }
        }
    }

    let mut hasher = CanonicalHasher::new(&root_ids, order.len());
    let mut vertices = Vec::with_capacity(order.len());
    let mut entry_total = 0usize;
    for (idx, &rep) in order.iter().enumerate() {
        let mut entries = arena.resolved_neighbors(rep);
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entry_total += entries.len();
        let neighbors: SmallVec<[(Symbol, VertexId); 4]> = entries
            .into_iter()
            .map(|(label, w)| {
                let target = number[w as usize].expect("neighbor of a reachable vertex is reachable");
                hasher.edge(idx as u32, &label, target);
                (label, VertexId(target))
            })
            .collect();
        vertices.push(VertexData { neighbors });
    }
    debug_assert!(entry_total % 2 == 0, "each edge stores exactly two directed entries");

    Graph {
        roots: root_ids,
        vertices,
        edge_count: entry_total / 2,
        hash: hasher.finish(),
        lattice: OnceCell::new(),
    }
}

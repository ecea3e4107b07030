//! Canonical structural hashing for folded graphs using blake3.
//!
//! The hash is computed over the canonical form produced by the breadth-first
//! renumbering in [`graph`](crate::graph): the root numbers, the vertex
//! count, and the ordered `(source, label, target)` triples. Because the
//! numbering itself is a canonical invariant of the rooted labeled
//! isomorphism class, two graphs hash equal iff they are isomorphic --
//! up to the standard birthday-bound collision risk, which this crate
//! accepts as its identity notion. Callers needing certainty can confirm
//! with a homomorphism check in both directions.
//!
//! # Determinism
//!
//! Same content always produces the same hash:
//! - the traversal visits labels in sorted [`Symbol`] order, so triples
//!   arrive in a canonical sequence;
//! - labels are serialized through `serde_json::to_vec` (no `HashMap`
//!   anywhere near hash-affecting iteration);
//! - integers are hashed as fixed-width little-endian bytes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::VertexId;
use crate::symbol::Symbol;

/// blake3 digest of a graph's canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralHash([u8; 32]);

impl StructuralHash {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering of the digest.
    pub fn to_hex(&self) -> String {
        format!("{}", self)
    }
}

impl fmt::Display for StructuralHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Incremental hasher fed by the canonical traversal.
///
/// Construction commits the root list and vertex count; each call to
/// [`CanonicalHasher::edge`] appends one directed neighbor entry in
/// canonical order.
pub(crate) struct CanonicalHasher {
    hasher: blake3::Hasher,
}

impl CanonicalHasher {
    pub(crate) fn new(roots: &[VertexId], vertex_count: usize) -> Self {
        let mut hasher = blake3::Hasher::new();
        let root_bytes =
            serde_json::to_vec(roots).expect("root list serialization should never fail");
        hasher.update(&root_bytes);
        hasher.update(&(vertex_count as u64).to_le_bytes());
        CanonicalHasher { hasher }
    }

    pub(crate) fn edge(&mut self, source: u32, label: &Symbol, target: u32) {
        let label_bytes =
            serde_json::to_vec(label).expect("symbol serialization should never fail");
        self.hasher.update(&source.to_le_bytes());
        self.hasher.update(&label_bytes);
        self.hasher.update(&target.to_le_bytes());
    }

    pub(crate) fn finish(self) -> StructuralHash {
        StructuralHash(*self.hasher.finalize().as_bytes())
    }
}

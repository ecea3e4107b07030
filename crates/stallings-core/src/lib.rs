//! Stallings graphs for finitely generated subgroups of free groups.
//!
//! A set of words over a generating alphabet folds into a deterministic,
//! co-deterministic, rooted labeled graph -- the Stallings graph of the
//! subgroup the words generate. This crate implements the graph engine:
//!
//! - [`Symbol`] / [`Word`]: oriented generator letters and freely reduced
//!   words.
//! - [`arena::FoldArena`]: incremental folding under union-find (petgraph's
//!   `UnionFind`), the mutable substrate every construction runs on.
//! - [`Graph`]: the canonical folded value -- construction from words,
//!   blake3 structural hashing for identity, homomorphism search realizing
//!   the subgroup order, disjoint combination, repetition, copy, and
//!   one-point extensions ([`Graph::children`]).
//! - [`Lattice`]: the closure over one-point extensions, with algebraic
//!   classification and the extremal Euler-characteristic invariant.
//!
//! Everything is a pure in-memory computation; serialization of graphs and
//! lattices to edge-list records lives in the companion export crate.

pub mod arena;
pub mod error;
pub mod graph;
pub mod hash;
pub mod id;
pub mod lattice;
pub mod symbol;
pub mod word;

// Re-export commonly used types
pub use error::CoreError;
pub use graph::{Graph, VertexData};
pub use hash::StructuralHash;
pub use id::{GraphId, VertexId};
pub use lattice::{Lattice, Link};
pub use symbol::Symbol;
pub use word::Word;

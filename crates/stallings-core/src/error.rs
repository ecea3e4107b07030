//! Core error types for stallings-core.
//!
//! Uses `thiserror` for structured, matchable error variants. The absence of
//! a graph homomorphism is deliberately NOT an error -- [`Graph::eta`]
//! returns `Option` and callers read `None` as "containment does not hold".
//! Internal invariant violations (e.g. consulting a vertex through a stale,
//! pre-merge handle) are programming defects guarded by assertions, not
//! recoverable conditions.
//!
//! [`Graph::eta`]: crate::graph::Graph::eta

use thiserror::Error;

/// Errors produced by the stallings-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Graph repetition with a count below one.
    #[error("repeat count must be at least 1, got {count}")]
    InvalidRepeat { count: i64 },
}

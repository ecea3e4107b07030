//! Oriented generator letters used as edge labels.
//!
//! A [`Symbol`] is a free-group generator together with an orientation bit.
//! Symbols are pure value types: equality, ordering, and hashing are by
//! `(name, inverted)`, and the ordering (name first, then orientation) is
//! what canonical traversals sort edge labels by.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A generator letter, possibly inverted.
///
/// `inverse` flips the orientation; applying it twice returns the original
/// symbol. A symbol is never equal to its own inverse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    name: String,
    inverted: bool,
}

impl Symbol {
    /// Creates the positively oriented letter with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            inverted: false,
        }
    }

    /// Returns this letter with the opposite orientation.
    pub fn inverse(&self) -> Symbol {
        Symbol {
            name: self.name.clone(),
            inverted: !self.inverted,
        }
    }

    /// The generator name, without orientation.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the inverted orientation.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "{}^-1", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_inverse_is_identity() {
        let x = Symbol::new("x");
        assert_eq!(x.inverse().inverse(), x);
    }

    #[test]
    fn symbol_is_never_its_own_inverse() {
        let x = Symbol::new("x");
        assert_ne!(x, x.inverse());
    }

    #[test]
    fn ordering_is_by_name_then_orientation() {
        let x = Symbol::new("x");
        let y = Symbol::new("y");
        assert!(x < x.inverse());
        assert!(x.inverse() < y);
        assert!(y < y.inverse());
    }

    #[test]
    fn display_forms() {
        let a = Symbol::new("a");
        assert_eq!(format!("{}", a), "a");
        assert_eq!(format!("{}", a.inverse()), "a^-1");
    }

    #[test]
    fn serde_roundtrip() {
        let s = Symbol::new("gamma").inverse();
        let json = serde_json::to_string(&s).unwrap();
        let back: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}

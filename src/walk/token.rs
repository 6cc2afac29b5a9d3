//! Closure and fragment tokens
//!
//!     The walk consumes a two-level token hierarchy. A closure is the coarse unit, a fragment
//!     the fine one, and every fragment belongs to exactly one closure. Both carry a display
//!     value and nothing else the engine interprets.
//!
//!     Tokens are produced before the walk starts and are never mutated by it. They
//!     serialize with serde so closure sequences can be stored as fixtures (see
//!     [loader](super::loader)).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fine-grained token inside a closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Display value of the fragment
    pub value: String,
    /// Index of this fragment inside its closure
    #[serde(default)]
    pub position: usize,
    /// Index of the owning closure in the closure sequence
    #[serde(default)]
    pub closure_index: usize,
}

impl Fragment {
    pub fn new(value: impl Into<String>, position: usize, closure_index: usize) -> Self {
        Self {
            value: value.into(),
            position,
            closure_index,
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An ordered group of fragments forming one unit at the coarse level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    /// Display value of the closure
    pub value: String,
    /// The fragments, in order
    #[serde(default)]
    pub fragments: Vec<Fragment>,
}

impl Closure {
    /// Create a closure from fragment values.
    ///
    /// Fragment positions are numbered from 0; the owning index is 0 until the closure is
    /// placed in a sequence with [with_index](Self::with_index).
    pub fn new<S: AsRef<str>>(value: impl Into<String>, fragments: &[S]) -> Self {
        let fragments = fragments
            .iter()
            .enumerate()
            .map(|(position, value)| Fragment::new(value.as_ref(), position, 0))
            .collect();

        Self {
            value: value.into(),
            fragments,
        }
    }

    /// Re-stamp this closure (and its fragments) as sitting at `index` in a sequence
    pub fn with_index(mut self, index: usize) -> Self {
        for (position, fragment) in self.fragments.iter_mut().enumerate() {
            fragment.position = position;
            fragment.closure_index = index;
        }
        self
    }

    /// Get the fragment at `index`
    pub fn fragment(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }

    /// Number of fragments in this closure
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if this closure has no fragments
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Build a closure sequence from `(closure value, fragment values)` pairs.
///
/// Fragment positions and owning indices are filled in.
pub fn closures_from(spec: &[(&str, &[&str])]) -> Vec<Closure> {
    spec.iter()
        .enumerate()
        .map(|(index, (value, fragments))| Closure::new(*value, *fragments).with_index(index))
        .collect()
}

/// Re-stamp every closure of a sequence with its index
pub fn index_closures(closures: Vec<Closure>) -> Vec<Closure> {
    closures
        .into_iter()
        .enumerate()
        .map(|(index, closure)| closure.with_index(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_new_numbers_fragments() {
        let closure = Closure::new("a.b", &["a", "b"]);
        assert_eq!(closure.len(), 2);
        assert_eq!(closure.fragment(1).map(|f| f.position), Some(1));
        assert_eq!(closure.fragment(1).map(|f| f.value.as_str()), Some("b"));
        assert!(closure.fragment(2).is_none());
    }

    #[test]
    fn test_closures_from_stamps_owner() {
        let closures = closures_from(&[("x", &["x"]), ("y z", &["y", "z"])]);
        assert_eq!(closures[1].fragments[1].closure_index, 1);
        assert_eq!(closures[1].fragments[1].position, 1);
        assert_eq!(closures[0].to_string(), "x");
    }

    #[test]
    fn test_empty_closure() {
        let empty: [&str; 0] = [];
        let closure = Closure::new("", &empty);
        assert!(closure.is_empty());
    }
}

//! The capture accumulator
//!
//!     A run collects its output here. The accumulator holds a list of head nodes; `setup`
//!     seeds it with a single node wrapping the first closure, and every accepted capture is
//!     stored on the heads under its tag. The engine owns the accumulator but never writes it
//!     directly; only [CaptureGroup](crate::walk::capture::CaptureGroup) does.

use crate::walk::token::Closure;
use serde::Serialize;
use std::collections::BTreeMap;

/// One captured value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Capture {
    /// Plain text: the token value, a whole regex match, or a function result
    Text(String),
    /// Named regex groups that took part in the match
    Groups(BTreeMap<String, String>),
}

impl Capture {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Capture::Text(text) => Some(text.as_str()),
            Capture::Groups(_) => None,
        }
    }

    pub fn group(&self, name: &str) -> Option<&str> {
        match self {
            Capture::Text(_) => None,
            Capture::Groups(groups) => groups.get(name).map(|s| s.as_str()),
        }
    }
}

/// Everything stored under one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CapturedValue {
    Single(Capture),
    Multiple(Vec<Capture>),
}

impl CapturedValue {
    /// The most recent capture stored under the tag
    pub fn last(&self) -> Option<&Capture> {
        match self {
            CapturedValue::Single(capture) => Some(capture),
            CapturedValue::Multiple(captures) => captures.last(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CapturedValue::Single(_) => 1,
            CapturedValue::Multiple(captures) => captures.len(),
        }
    }

    /// Always false for values stored by a capture; kept alongside `len` for clippy's
    /// `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A head of the result: a closure and what was captured while walking from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosureNode {
    pub closure: Closure,
    pub captures: BTreeMap<String, CapturedValue>,
}

impl ClosureNode {
    pub fn new(closure: Closure) -> Self {
        Self {
            closure,
            captures: BTreeMap::new(),
        }
    }

    pub fn get(&self, tag: &str) -> Option<&CapturedValue> {
        self.captures.get(tag)
    }

    /// Store a single value, replacing whatever the tag held
    pub(crate) fn set(&mut self, tag: &str, capture: Capture) {
        self.captures
            .insert(tag.to_string(), CapturedValue::Single(capture));
    }

    /// Append a value to the tag's list.
    ///
    /// A tag previously holding a single value is promoted to a list.
    pub(crate) fn append(&mut self, tag: &str, capture: Capture) {
        match self.captures.remove(tag) {
            None => {
                self.captures
                    .insert(tag.to_string(), CapturedValue::Multiple(vec![capture]));
            }
            Some(CapturedValue::Single(previous)) => {
                self.captures.insert(
                    tag.to_string(),
                    CapturedValue::Multiple(vec![previous, capture]),
                );
            }
            Some(CapturedValue::Multiple(mut captures)) => {
                captures.push(capture);
                self.captures
                    .insert(tag.to_string(), CapturedValue::Multiple(captures));
            }
        }
    }
}

/// The accumulator a run writes its captures into
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaptureResult {
    pub heads: Vec<ClosureNode>,
}

impl CaptureResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result seeded with one head for `closure`
    pub fn seeded(closure: Closure) -> Self {
        Self {
            heads: vec![ClosureNode::new(closure)],
        }
    }

    pub fn heads(&self) -> &[ClosureNode] {
        &self.heads
    }

    pub(crate) fn heads_mut(&mut self) -> &mut [ClosureNode] {
        &mut self.heads
    }

    /// True if there are no heads
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    /// The value stored under `tag` on the first head
    pub fn get(&self, tag: &str) -> Option<&CapturedValue> {
        self.heads.first().and_then(|head| head.get(tag))
    }

    /// True if any head holds a value under `tag`
    pub fn contains(&self, tag: &str) -> bool {
        self.heads.iter().any(|head| head.captures.contains_key(tag))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

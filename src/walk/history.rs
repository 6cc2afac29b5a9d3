//! Undo log for the cursor
//!
//!     The history is a stack of the cursor moves made since the last checkpoint. Each step
//!     names the cursor it moved and the delta it applied, which is everything a rewind needs
//!     to take that move back: replaying the stack from the top and subtracting every delta
//!     from its cursor lands on the checkpoint.
//!
//! Deltas
//!
//!     Same-level moves are always unit steps: a fragment advance logs `Fragment(1)` and a
//!     closure advance logs `Closure(1)`. Entering a closure also resets the fragment index
//!     to -1 from wherever it was, so that reset is logged as `Fragment(-1 - previous)`.
//!     Subtracting it from -1 gives `previous` back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cursor pair: closure index and fragment index, -1 meaning "not entered"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub closure: isize,
    pub fragment: isize,
}

impl Position {
    /// Where every walk starts: no closure and no fragment entered
    pub const START: Position = Position {
        closure: -1,
        fragment: -1,
    };

    pub fn new(closure: isize, fragment: isize) -> Self {
        Self { closure, fragment }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.closure, self.fragment)
    }
}

/// One undoable cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryStep {
    /// The fragment index moved by this delta
    Fragment(isize),
    /// The closure index moved by this delta
    Closure(isize),
}

impl HistoryStep {
    /// Take this move back on `position`
    pub fn undo(&self, position: &mut Position) {
        match self {
            HistoryStep::Fragment(delta) => position.fragment -= delta,
            HistoryStep::Closure(delta) => position.closure -= delta,
        }
    }

    /// The step that records a fragment reset from `previous` back to -1
    pub fn fragment_reset(previous: isize) -> Self {
        HistoryStep::Fragment(-1 - previous)
    }
}

/// The stack of moves since the last checkpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct History {
    steps: Vec<HistoryStep>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: HistoryStep) {
        self.steps.push(step);
    }

    /// Drop every step; nothing before this point can be undone afterwards
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in the order they were pushed
    pub fn steps(&self) -> &[HistoryStep] {
        &self.steps
    }

    /// The position a rewind from `position` would restore.
    ///
    /// Works on a copy; the log itself is left as is.
    pub fn unwind(&self, mut position: Position) -> Position {
        for step in self.steps.iter().rev() {
            step.undo(&mut position);
        }
        position
    }
}

//! Error types for the walk
//!
//!     Every error here, except the loader and pattern ones, is a contract violation: the
//!     calling grammar asked for something the cursor cannot do. The engine reports these
//!     from the offending call and leaves its cursor untouched, so the grammar propagates
//!     them with `?` and the run ends. Failed match attempts are not errors; they are
//!     handled with a rewind.

use std::fmt;

/// Errors raised by the engine, the capture subsystem and the closure loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    /// `setup` was called with no closures
    EmptyClosures,
    /// `next_closure` was called with no closure left
    ClosuresExhausted { closure_index: isize, count: usize },
    /// A fragment operation was attempted before any closure was entered
    NoCurrentClosure,
    /// `next_fragment` was called with no fragment left in the current closure
    FragmentsExhausted {
        closure_index: isize,
        fragment_index: isize,
        count: usize,
    },
    /// A fragment capture was attempted before any fragment was entered
    NoCurrentFragment,
    /// A capture was executed against a result with no head nodes
    NoResultHeads,
    /// A capture rule was given a pattern that does not compile
    InvalidPattern(String),
    /// Reading a closure file failed
    Io(String),
    /// A closure file could not be decoded
    Format(String),
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkError::EmptyClosures => write!(f, "Cannot set up a walk with no closures"),
            WalkError::ClosuresExhausted {
                closure_index,
                count,
            } => write!(
                f,
                "No closure after index {} (sequence has {} closures)",
                closure_index, count
            ),
            WalkError::NoCurrentClosure => write!(f, "No closure has been entered yet"),
            WalkError::FragmentsExhausted {
                closure_index,
                fragment_index,
                count,
            } => write!(
                f,
                "No fragment after index {} in closure {} (closure has {} fragments)",
                fragment_index, closure_index, count
            ),
            WalkError::NoCurrentFragment => write!(f, "No fragment has been entered yet"),
            WalkError::NoResultHeads => {
                write!(f, "Capture result has no head nodes to store into")
            }
            WalkError::InvalidPattern(msg) => write!(f, "Invalid capture pattern: {}", msg),
            WalkError::Io(msg) => write!(f, "IO error: {}", msg),
            WalkError::Format(msg) => write!(f, "Invalid closure data: {}", msg),
        }
    }
}

impl std::error::Error for WalkError {}

impl From<std::io::Error> for WalkError {
    fn from(err: std::io::Error) -> Self {
        WalkError::Io(err.to_string())
    }
}

impl From<regex::Error> for WalkError {
    fn from(err: regex::Error) -> Self {
        WalkError::InvalidPattern(err.to_string())
    }
}

impl From<serde_json::Error> for WalkError {
    fn from(err: serde_json::Error) -> Self {
        WalkError::Format(err.to_string())
    }
}

impl From<serde_yaml::Error> for WalkError {
    fn from(err: serde_yaml::Error) -> Self {
        WalkError::Format(err.to_string())
    }
}

/// Result alias used throughout the walk
pub type WalkResult<T> = Result<T, WalkError>;

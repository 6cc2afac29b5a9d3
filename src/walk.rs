//! Closure walking
//!
//!     The walk is the whole life of one parse run: a grammar hands the engine a closure
//!     sequence, then steps through it one closure or fragment at a time.
//!
//! Cursor
//!
//!     The engine keeps two signed offsets. The closure index points into the closure
//!     sequence, the fragment index into the fragments of the current closure. Both start at
//!     -1, meaning nothing has been entered yet. Entering a new closure always drops the
//!     fragment index back to -1.
//!
//! Checkpoints
//!
//!     Every cursor move since the last commit is written to the history log. A rewind replays
//!     the log backwards and lands exactly on the last checkpoint; a commit throws the log
//!     away. Moves within one level are logged as unit deltas. The fragment reset that comes
//!     with entering a closure is logged as a computed delta, since the fragment index it
//!     discards can be anything.
//!
//! Captures
//!
//!     Capturing is delegated to a [CaptureGroup](capture::CaptureGroup) that only reads the
//!     cursor and writes into the [result accumulator](result::CaptureResult).

pub mod capture;
pub mod config;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod history;
pub mod loader;
pub mod result;
pub mod testing;
pub mod token;

//! # tagwalk
//!
//! A backtracking traversal engine for hand-written grammars.
//!
//! Input arrives already tokenized as a sequence of closures, each one holding a sequence of
//! fragments. A grammar walks that sequence through the [`Engine`](walk::engine::Engine)
//! cursor, captures values into a result accumulator, and either commits what it consumed or
//! rewinds to the last checkpoint and tries another path.
//!
//! File Layout
//!
//! src/walk
//!   ├── token        Closures and fragments
//!   ├── loader       Closure sequences from JSON / YAML
//!   ├── history      Undo log and cursor positions
//!   ├── engine       The cursor/checkpoint engine
//!   ├── capture      Capture rules and groups
//!   ├── result       The capture accumulator
//!   ├── grammar      The contract concrete grammars implement
//!   ├── config       Engine configuration
//!   └── error        Error types
//!
//! For the shared test fixtures, see the [testing module](walk::testing).

pub mod walk;

pub use walk::engine::Engine;
pub use walk::error::{WalkError, WalkResult};
pub use walk::grammar::Grammar;
pub use walk::token::{Closure, Fragment};

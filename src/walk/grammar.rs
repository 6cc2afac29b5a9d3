//! The grammar contract
//!
//!     The engine has no matching logic of its own. Each concrete grammar implements
//!     [Grammar::run]: it calls `setup`, walks the closures with the advance operations,
//!     tries captures, and commits or rewinds as its matching logic dictates. How success is
//!     reported is up to the grammar, through its `Output` type.
//!
//!     The engine promises two things to a grammar:
//!
//!         1. Every cursor move made since the last checkpoint is undone by `rewind`.
//!         2. `commit` gives up the ability to undo anything consumed before it.

use crate::walk::engine::Engine;
use crate::walk::error::WalkResult;
use crate::walk::token::Closure;

/// A hand-written grammar driven over an [Engine]
pub trait Grammar {
    /// What a run reports back
    type Output;

    /// Walk `closures` on `engine`.
    ///
    /// Contract violations raised by the engine end the run and are returned as is.
    fn run(&mut self, engine: &mut Engine, closures: Vec<Closure>) -> WalkResult<Self::Output>;
}

impl Engine {
    /// Drive `grammar` over `closures` on this engine
    pub fn run<G>(&mut self, grammar: &mut G, closures: Vec<Closure>) -> WalkResult<G::Output>
    where
        G: Grammar + ?Sized,
    {
        grammar.run(self, closures)
    }
}

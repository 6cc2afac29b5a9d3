//! The cursor/checkpoint engine
//!
//!     The engine owns everything a single run needs: the closure sequence, the two cursor
//!     offsets, the history log, the match cache and the result accumulator. Grammars drive
//!     it through a small imperative API:
//!
//!         - advance: [next_closure](Engine::next_closure), [next_fragment](Engine::next_fragment)
//!         - look ahead: [closure_available](Engine::closure_available),
//!           [fragment_available](Engine::fragment_available)
//!         - transactions: [commit](Engine::commit), [rewind](Engine::rewind)
//!         - captures: [capture_fragment](Engine::capture_fragment),
//!           [capture_closure](Engine::capture_closure)
//!
//!     A typical grammar step looks like:
//!
//!         while engine.fragment_available() {
//!             engine.next_fragment()?;
//!             if engine.capture_fragment("year", rule).execute()? {
//!                 engine.commit();
//!             } else {
//!                 engine.rewind();
//!             }
//!         }
//!
//! Lifecycle
//!
//!     One engine serves one run at a time and is reused across runs. `reset` drops all run
//!     state; `setup` resets and binds a new closure sequence, seeding the result with a head
//!     for the first closure. Entering that first closure is the fixed start of the run and
//!     is not recorded in the history, so no rewind ever leaves closure 0 once it is entered.
//!
//! Contract violations
//!
//!     Advancing past the end, or fragment operations before the first closure, return an
//!     error and leave the cursor where it was.

use crate::walk::capture::{CaptureGroup, CaptureRule, CursorView, MatchCache};
use crate::walk::config::EngineConfig;
use crate::walk::error::{WalkError, WalkResult};
use crate::walk::history::{History, HistoryStep, Position};
use crate::walk::result::CaptureResult;
use crate::walk::token::{Closure, Fragment};
use log::debug;

/// Backtracking cursor over a closure sequence
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    closures: Vec<Closure>,
    result: CaptureResult,
    match_cache: MatchCache,
    closure_index: isize,
    fragment_index: isize,
    history: History,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            closures: Vec::new(),
            result: CaptureResult::new(),
            match_cache: MatchCache::new(),
            closure_index: -1,
            fragment_index: -1,
            history: History::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Drop all run state: closures, result, match cache, cursor and history
    pub fn reset(&mut self) {
        self.closures = Vec::new();
        self.result = CaptureResult::new();
        self.match_cache.clear();
        self.closure_index = -1;
        self.fragment_index = -1;
        self.history.clear();
    }

    /// Reset and bind `closures` for a new run.
    ///
    /// The result is seeded with one head wrapping the first closure. An empty sequence is
    /// rejected and leaves the engine reset.
    pub fn setup(&mut self, closures: Vec<Closure>) -> WalkResult<()> {
        self.reset();

        let first = closures.first().cloned().ok_or(WalkError::EmptyClosures)?;
        self.closures = closures;
        self.result = CaptureResult::seeded(first);
        Ok(())
    }

    //
    // Cursor state
    //

    pub fn closures(&self) -> &[Closure] {
        &self.closures
    }

    pub fn closure_count(&self) -> usize {
        self.closures.len()
    }

    pub fn closure_index(&self) -> isize {
        self.closure_index
    }

    pub fn fragment_index(&self) -> isize {
        self.fragment_index
    }

    pub fn position(&self) -> Position {
        Position::new(self.closure_index, self.fragment_index)
    }

    /// The position `rewind` would restore right now
    pub fn checkpoint(&self) -> Position {
        self.history.unwind(self.position())
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Read-only view of the cursor, as handed to capture groups
    pub fn view(&self) -> CursorView<'_> {
        CursorView::new(&self.closures, self.position())
    }

    pub fn current_closure(&self) -> Option<&Closure> {
        self.view().current_closure()
    }

    pub fn current_fragment(&self) -> Option<&Fragment> {
        self.view().current_fragment()
    }

    //
    // Closures
    //

    pub fn closure_available(&self) -> bool {
        self.closure_index + 1 < self.closures.len() as isize
    }

    /// Enter the next closure.
    ///
    /// The fragment index drops back to -1. Both moves are logged, except the closure move
    /// into the very first closure.
    pub fn next_closure(&mut self) -> WalkResult<&Closure> {
        if !self.closure_available() {
            return Err(WalkError::ClosuresExhausted {
                closure_index: self.closure_index,
                count: self.closures.len(),
            });
        }

        self.closure_index += 1;

        self.history
            .push(HistoryStep::fragment_reset(self.fragment_index));
        self.fragment_index = -1;

        if self.closure_index != 0 {
            self.history.push(HistoryStep::Closure(1));
        }

        let closure = &self.closures[self.closure_index as usize];
        debug!("(next_closure) closure.value: \"{}\"", closure.value);
        Ok(closure)
    }

    //
    // Fragments
    //

    /// True if a closure has been entered and it has a fragment after the current one
    pub fn fragment_available(&self) -> bool {
        match self.current_closure() {
            Some(closure) => self.fragment_index + 1 < closure.len() as isize,
            None => false,
        }
    }

    /// Enter the next fragment of the current closure
    pub fn next_fragment(&mut self) -> WalkResult<&Fragment> {
        let count = self
            .current_closure()
            .ok_or(WalkError::NoCurrentClosure)?
            .len();

        if !self.fragment_available() {
            return Err(WalkError::FragmentsExhausted {
                closure_index: self.closure_index,
                fragment_index: self.fragment_index,
                count,
            });
        }

        self.fragment_index += 1;
        self.history.push(HistoryStep::Fragment(1));

        let closure = &self.closures[self.closure_index as usize];
        let fragment = &closure.fragments[self.fragment_index as usize];
        debug!(
            "(next_fragment) closure.value \"{}\" - fragment.value: \"{}\"",
            closure.value, fragment.value
        );
        Ok(fragment)
    }

    //
    // Transactions
    //

    /// Undo every move since the last checkpoint, then make this the new checkpoint
    pub fn rewind(&mut self) {
        let mut position = self.position();
        for step in self.history.steps().iter().rev() {
            debug!("(rewind) Rewinding step: {:?}", step);
            step.undo(&mut position);
        }

        self.closure_index = position.closure;
        self.fragment_index = position.fragment;
        self.commit();
    }

    /// Accept everything consumed so far; it can no longer be rewound
    pub fn commit(&mut self) {
        debug!("(commit)");
        self.history.clear();
    }

    //
    // Captures
    //

    /// Start a capture group with a step on the current fragment
    pub fn capture_fragment(&mut self, tag: &str, rule: CaptureRule) -> CaptureGroup<'_> {
        self.capture_group().capture_fragment(tag, rule)
    }

    /// Start a capture group with a step on the current closure
    pub fn capture_closure(&mut self, tag: &str, rule: CaptureRule) -> CaptureGroup<'_> {
        self.capture_group().capture_closure(tag, rule)
    }

    fn capture_group(&mut self) -> CaptureGroup<'_> {
        let view = CursorView::new(
            &self.closures,
            Position::new(self.closure_index, self.fragment_index),
        );
        CaptureGroup::new(view, &mut self.result, &mut self.match_cache, &self.config)
    }

    //
    // Result
    //

    pub fn result(&self) -> &CaptureResult {
        &self.result
    }

    /// Hand the accumulator to the caller, leaving an empty one behind
    ///
    /// The empty accumulator has no heads, so captures after this fail with
    /// [WalkError::NoResultHeads] until the next `setup`.
    pub fn take_result(&mut self) -> CaptureResult {
        std::mem::take(&mut self.result)
    }

    /// Number of memoized regex outcomes in this run
    pub fn cached_matches(&self) -> usize {
        self.match_cache.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

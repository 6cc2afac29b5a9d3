//! Capture rules and groups
//!
//!     A capture takes the value of the current fragment or closure, runs it through a
//!     [CaptureRule], and on success stores the outcome in the result accumulator under a
//!     tag. Rules are plain data built by the grammar:
//!
//!         - no regex, no function: the token value is captured as is
//!         - regex: the value must match; named groups are captured as a map, otherwise the
//!           whole match is captured as text
//!         - function: receives the value (or the regex match, if both are set) and returns
//!           the captured text, or `None` to reject
//!
//!     A [CaptureGroup] collects one or more steps and runs them all at once with
//!     [execute](CaptureGroup::execute). Either every step is accepted and written, or nothing
//!     is written. The group only ever reads the cursor; moving it stays with the grammar.

use crate::walk::config::{EngineConfig, SinglePolicy};
use crate::walk::error::{WalkError, WalkResult};
use crate::walk::history::Position;
use crate::walk::result::{Capture, CaptureResult};
use crate::walk::token::{Closure, Fragment};
use log::debug;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_REGEX_ID: AtomicU64 = AtomicU64::new(0);

/// Custom extraction: maps a value to the captured text, `None` rejects
pub type CaptureFn = Box<dyn Fn(&str) -> Option<String>>;

/// How one tag extracts its value from a token
pub struct CaptureRule {
    regex: Option<(u64, Regex)>,
    func: Option<CaptureFn>,
    single: bool,
}

impl CaptureRule {
    /// A rule that captures the token value as is, into a single-valued tag
    pub fn new() -> Self {
        Self {
            regex: None,
            func: None,
            single: true,
        }
    }

    /// Require the value to match `pattern`
    pub fn regex(self, pattern: &str) -> WalkResult<Self> {
        Ok(self.with_regex(Regex::new(pattern)?))
    }

    /// Require the value to match an already compiled regex
    pub fn with_regex(mut self, regex: Regex) -> Self {
        // one id per compiled regex: equal pattern text can differ in flags
        let id = NEXT_REGEX_ID.fetch_add(1, Ordering::Relaxed);
        self.regex = Some((id, regex));
        self
    }

    /// Extract with a custom function
    pub fn func<F>(mut self, func: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.func = Some(Box::new(func));
        self
    }

    /// Whether the tag holds at most one value (`true`) or accumulates them (`false`)
    pub fn single(mut self, single: bool) -> Self {
        self.single = single;
        self
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    /// Run the rule against `value`.
    ///
    /// Regex outcomes go through `cache` when one is given.
    pub fn evaluate(&self, value: &str, cache: Option<&mut MatchCache>) -> Option<Capture> {
        let regex_match = match &self.regex {
            None => None,
            Some((id, regex)) => {
                let outcome = match cache {
                    Some(cache) => cache.lookup(*id, regex, value),
                    None => match_regex(regex, value),
                };
                // A rule with a regex rejects when it does not match
                Some(outcome?)
            }
        };

        match (regex_match, &self.func) {
            (None, None) => Some(Capture::Text(value.to_string())),
            (None, Some(func)) => func(value).map(Capture::Text),
            (Some(found), None) => Some(found.capture),
            (Some(found), Some(func)) => func(&found.text).map(Capture::Text),
        }
    }
}

impl Default for CaptureRule {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CaptureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureRule")
            .field("regex", &self.regex.as_ref().map(|(_, r)| r.as_str()))
            .field("func", &self.func.is_some())
            .field("single", &self.single)
            .finish()
    }
}

/// A successful regex match: the whole matched text and what gets captured from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch {
    pub text: String,
    pub capture: Capture,
}

fn match_regex(regex: &Regex, value: &str) -> Option<RegexMatch> {
    let caps = regex.captures(value)?;
    let text = caps.get(0)?.as_str().to_string();

    let mut names = regex.capture_names().flatten().peekable();
    let capture = if names.peek().is_some() {
        let groups: BTreeMap<String, String> = names
            .filter_map(|name| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
            .collect();
        Capture::Groups(groups)
    } else {
        Capture::Text(text.clone())
    };

    Some(RegexMatch { text, capture })
}

/// Memoized regex outcomes, keyed by `(regex id, value)`.
///
/// Grammars that backtrack evaluate the same rule against the same token many times; the
/// cache lives for one run and is cleared by `reset`.
#[derive(Debug, Clone, Default)]
pub struct MatchCache {
    entries: HashMap<(u64, String), Option<RegexMatch>>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome of `regex` on `value`; `id` identifies the compiled regex
    pub fn lookup(&mut self, id: u64, regex: &Regex, value: &str) -> Option<RegexMatch> {
        self.entries
            .entry((id, value.to_string()))
            .or_insert_with(|| match_regex(regex, value))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Read-only view of the engine cursor handed to the capture subsystem
#[derive(Debug, Clone, Copy)]
pub struct CursorView<'e> {
    closures: &'e [Closure],
    position: Position,
}

impl<'e> CursorView<'e> {
    pub fn new(closures: &'e [Closure], position: Position) -> Self {
        Self { closures, position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_closure(&self) -> Option<&'e Closure> {
        usize::try_from(self.position.closure)
            .ok()
            .and_then(|index| self.closures.get(index))
    }

    pub fn current_fragment(&self) -> Option<&'e Fragment> {
        let closure = self.current_closure()?;
        usize::try_from(self.position.fragment)
            .ok()
            .and_then(|index| closure.fragment(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Fragment,
    Closure,
}

#[derive(Debug)]
struct CaptureStep {
    target: Target,
    tag: String,
    rule: CaptureRule,
}

/// A set of capture steps bound to one engine and its result accumulator
pub struct CaptureGroup<'e> {
    view: CursorView<'e>,
    result: &'e mut CaptureResult,
    cache: &'e mut MatchCache,
    config: &'e EngineConfig,
    steps: Vec<CaptureStep>,
}

impl<'e> CaptureGroup<'e> {
    pub fn new(
        view: CursorView<'e>,
        result: &'e mut CaptureResult,
        cache: &'e mut MatchCache,
        config: &'e EngineConfig,
    ) -> Self {
        Self {
            view,
            result,
            cache,
            config,
            steps: Vec::new(),
        }
    }

    /// Add a step capturing the current fragment under `tag`
    pub fn capture_fragment(mut self, tag: &str, rule: CaptureRule) -> Self {
        self.steps.push(CaptureStep {
            target: Target::Fragment,
            tag: tag.to_string(),
            rule,
        });
        self
    }

    /// Add a step capturing the current closure under `tag`
    pub fn capture_closure(mut self, tag: &str, rule: CaptureRule) -> Self {
        self.steps.push(CaptureStep {
            target: Target::Closure,
            tag: tag.to_string(),
            rule,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Evaluate every step and store the captures if all of them are accepted.
    ///
    /// Returns `Ok(false)` when a rule rejects its value, or when a single-valued tag is
    /// already filled under [SinglePolicy::Reject]. Nothing is written in either case.
    /// A result with no heads (taken with `take_result`, or never set up) is an error.
    pub fn execute(self) -> WalkResult<bool> {
        let CaptureGroup {
            view,
            result,
            cache,
            config,
            steps,
        } = self;

        if result.is_empty() {
            return Err(WalkError::NoResultHeads);
        }

        let mut accepted = Vec::with_capacity(steps.len());
        for step in &steps {
            let value = match step.target {
                Target::Closure => &view
                    .current_closure()
                    .ok_or(WalkError::NoCurrentClosure)?
                    .value,
                Target::Fragment => {
                    if view.current_closure().is_none() {
                        return Err(WalkError::NoCurrentClosure);
                    }
                    &view
                        .current_fragment()
                        .ok_or(WalkError::NoCurrentFragment)?
                        .value
                }
            };

            let step_cache = if config.cache_matches {
                Some(&mut *cache)
            } else {
                None
            };

            match step.rule.evaluate(value, step_cache) {
                Some(capture) => accepted.push(capture),
                None => {
                    debug!("(capture) \"{}\" rejected value \"{}\"", step.tag, value);
                    return Ok(false);
                }
            }

            if step.rule.is_single()
                && config.single_policy == SinglePolicy::Reject
                && result.contains(&step.tag)
            {
                debug!("(capture) \"{}\" already holds a value", step.tag);
                return Ok(false);
            }
        }

        for head in result.heads_mut() {
            for (step, capture) in steps.iter().zip(&accepted) {
                if step.rule.is_single() {
                    head.set(&step.tag, capture.clone());
                } else {
                    head.append(&step.tag, capture.clone());
                }
            }
        }

        debug!("(capture) stored {} value(s) at {}", accepted.len(), view.position());
        Ok(true)
    }
}

//! Test fixtures
//!
//!     Shared closure sequences for unit and integration tests. Building closures by hand
//!     gets the owning indices wrong easily, so tests should go through these helpers (or
//!     [ClosureLoader](super::loader::ClosureLoader)) instead of assembling tokens inline.

use crate::walk::token::{index_closures, Closure};
use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s._\-]+").unwrap());

/// Two closures, `[f0, f1]` and `[f2]`
pub fn sample_closures() -> Vec<Closure> {
    index_closures(vec![
        Closure::new("f0 f1", &["f0", "f1"]),
        Closure::new("f2", &["f2"]),
    ])
}

/// One closure per input string, split into fragments on whitespace, dots, underscores and
/// dashes
pub fn closures_from_text(texts: &[&str]) -> Vec<Closure> {
    let closures = texts
        .iter()
        .map(|text| {
            let fragments: Vec<&str> = SEPARATORS
                .split(text)
                .filter(|part| !part.is_empty())
                .collect();
            Closure::new(*text, &fragments)
        })
        .collect();
    index_closures(closures)
}

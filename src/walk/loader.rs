//! Closure sequence loading
//!
//! This module provides `ClosureLoader` - a utility for reading closure sequences from JSON or
//! YAML, as strings or files. It is used to keep grammar fixtures out of test code.
//!
//! Both formats use the serialized shape of [Closure]: a list of closures, each with a
//! `value` and a list of `fragments`, each with a `value`. Positions and owning indices may be
//! left out; they are filled in on load.
//!
//! ```yaml
//! - value: Show.Name
//!   fragments:
//!     - value: Show
//!     - value: Name
//! - value: S01E02
//!   fragments:
//!     - value: S01E02
//! ```

use crate::walk::error::{WalkError, WalkResult};
use crate::walk::token::{index_closures, Closure};
use std::fs;
use std::path::Path;

/// Reads closure sequences
pub struct ClosureLoader;

impl ClosureLoader {
    pub fn from_json_str(source: &str) -> WalkResult<Vec<Closure>> {
        let closures: Vec<Closure> = serde_json::from_str(source)?;
        Ok(index_closures(closures))
    }

    pub fn from_yaml_str(source: &str) -> WalkResult<Vec<Closure>> {
        let closures: Vec<Closure> = serde_yaml::from_str(source)?;
        Ok(index_closures(closures))
    }

    /// Load a file, picking the format from its extension (`json`, `yaml` or `yml`)
    pub fn from_path<P: AsRef<Path>>(path: P) -> WalkResult<Vec<Closure>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&source),
            other => Err(WalkError::Format(format!(
                "Unsupported closure file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

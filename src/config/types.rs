//! Configuration types and defaults for edict.

use serde::{Deserialize, Serialize};

/// What happens when a rule or guideline key is registered twice within one
/// compile unit.
///
/// In every case only the latest object for the key is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Record an error diagnostic; `compile()` fails (default, safest).
    #[default]
    Error,
    /// Record a warning diagnostic and keep going.
    Warn,
    /// Replace silently.
    Overwrite,
}

/// Default globs for `edict scan`.
pub fn default_scan_globs() -> Vec<String> {
    vec!["**/*.md".to_string(), "**/*.txt".to_string()]
}

// Default value functions for serde
pub(crate) fn default_output_dir() -> String {
    "out".to_string()
}
pub(crate) fn default_output_extension() -> String {
    "md".to_string()
}

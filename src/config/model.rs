//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for edict.
///
/// This struct represents the contents of `edict.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Compilation settings
    // =========================================================================
    /// Policy for duplicate rule/guideline keys within one compile unit.
    #[serde(default)]
    pub collision_policy: CollisionPolicy,

    /// Whether unresolved store references fail `lint` and `render`.
    #[serde(default)]
    pub fail_on_unresolved: bool,

    // =========================================================================
    // Output settings
    // =========================================================================
    /// Directory `render` writes documents to (default: "out").
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Extension of rendered documents, no leading dot (default: "md").
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    // =========================================================================
    // Scan and audit settings
    // =========================================================================
    /// Globs selecting rendered documents for `scan`.
    #[serde(default = "default_scan_globs")]
    pub scan_globs: Vec<String>,

    /// NDJSON file receiving one event per compiled command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events_log: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::default(),
            fail_on_unresolved: false,
            output_dir: default_output_dir(),
            output_extension: default_output_extension(),
            scan_globs: default_scan_globs(),
            events_log: None,
        }
    }
}

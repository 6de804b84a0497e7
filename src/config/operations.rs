//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{EdictError, Result};
use globset::Glob;
use std::path::Path;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "edict.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            EdictError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the config for a CLI run.
    ///
    /// An explicit path must exist. Without one, `edict.yaml` in `dir` is used
    /// when present, defaults otherwise.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| EdictError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `output_dir` must be non-empty
    /// - `output_extension` must be non-empty and have no leading dot
    /// - every `scan_globs` entry must be a valid glob
    pub fn validate(&self) -> Result<()> {
        if self.output_dir.trim().is_empty() {
            return Err(EdictError::UserError(
                "config validation failed: output_dir must be non-empty".to_string(),
            ));
        }

        if self.output_extension.is_empty() {
            return Err(EdictError::UserError(
                "config validation failed: output_extension must be non-empty".to_string(),
            ));
        }
        if self.output_extension.starts_with('.') {
            return Err(EdictError::UserError(format!(
                "config validation failed: output_extension must not have a leading dot (found '{}'). Use '{}' instead.",
                self.output_extension,
                self.output_extension.trim_start_matches('.')
            )));
        }

        for pattern in &self.scan_globs {
            Glob::new(pattern).map_err(|e| {
                EdictError::UserError(format!(
                    "config validation failed: invalid scan glob '{}': {}",
                    pattern, e
                ))
            })?;
        }

        Ok(())
    }
}

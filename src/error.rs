//! Error types for edict.
//!
//! Uses thiserror for derive macros. Building and rendering a compile unit is
//! total; these errors only surface at the edges (file loading, config,
//! and `CompileUnit::compile` turning collected diagnostics into a failure).

use crate::exit_codes;
use thiserror::Error;

/// Main error type for edict operations.
#[derive(Error, Debug)]
pub enum EdictError {
    /// User provided invalid arguments, unreadable files, or malformed input.
    #[error("{0}")]
    UserError(String),

    /// A compile unit collected error-level diagnostics while being defined.
    #[error("Definition failed: {0}")]
    DefinitionError(String),

    /// Lint checks found unresolved references.
    #[error("Lint failed: {0}")]
    LintFailure(String),
}

impl EdictError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            EdictError::UserError(_) => exit_codes::USER_ERROR,
            EdictError::DefinitionError(_) => exit_codes::DEFINITION_FAILURE,
            EdictError::LintFailure(_) => exit_codes::LINT_FAILURE,
        }
    }
}

/// Result type alias for edict operations.
pub type Result<T> = std::result::Result<T, EdictError>;

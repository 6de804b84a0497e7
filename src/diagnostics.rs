//! Definition-time diagnostics collected by a compile unit.
//!
//! Two anomaly classes exist: structural collisions (a key registered twice)
//! and dangling store references. Include problems from definition files
//! (unknown or cyclic libraries) are reported the same way.

use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Makes `CompileUnit::compile` fail.
    Error,
    /// Reported but does not block compilation.
    Warning,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A rule key was registered more than once.
    RuleCollision { key: String },
    /// A guideline key was registered more than once.
    GuidelineCollision { key: String },
    /// A store name was referenced without being declared.
    UnresolvedReference { name: String },
    /// A library include chain loops back on itself.
    LibraryCycle { chain: Vec<String> },
    /// An include names a library that does not exist.
    UnknownLibrary { name: String },
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: Level,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    /// Library composition trail active when the diagnostic was recorded.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub via: Vec<String>,
}

impl Diagnostic {
    pub fn new(level: Level, kind: DiagnosticKind) -> Self {
        Self {
            level,
            kind,
            via: Vec::new(),
        }
    }

    /// Attach the library trail the diagnostic was raised under.
    pub fn with_via(mut self, via: Vec<String>) -> Self {
        self.via = via;
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// Human-readable message without the level prefix.
    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::RuleCollision { key } => format!("duplicate rule key '{}'", key),
            DiagnosticKind::GuidelineCollision { key } => {
                format!("duplicate guideline key '{}'", key)
            }
            DiagnosticKind::UnresolvedReference { name } => {
                format!("unresolved store reference '{}'", name)
            }
            DiagnosticKind::LibraryCycle { chain } => {
                format!("library include cycle: {}", chain.join(" -> "))
            }
            DiagnosticKind::UnknownLibrary { name } => format!("unknown library '{}'", name),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message())?;
        if !self.via.is_empty() {
            write!(f, " (via {})", self.via.join(" > "))?;
        }
        Ok(())
    }
}

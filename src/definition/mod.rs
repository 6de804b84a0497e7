//! Definition files: commands and libraries described in YAML.
//!
//! A definition file is the call sequence a command author would otherwise
//! write against the builder API. Each command is replayed into its own
//! fresh [`CompileUnit`], steps strictly in source order.
//!
//! # File Format
//!
//! ```yaml
//! libraries:
//!   quality:
//!     - rule: tests-pass
//!       severity: critical
//!       text: All tests must pass.
//!       why: Broken builds block every other task.
//!   base:
//!     - include: quality
//!     - include: builtin:error-handling
//!
//! commands:
//!   task:validate:
//!     store:
//!       - name: TASK
//!         description: The task under validation.
//!     steps:
//!       - include: base
//!       - guideline: workflow
//!         goal: Validate {$TASK}.
//!         example: true
//!         phases:
//!           - Read the task.
//!           - if: { cond: tests fail, then: Report failures, else: Mark as validated }
//!           - parallel: [Run unit tests, Run lints]
//! ```
//!
//! Phase entries are a string (leaf), a list (sequence), or a single-key map
//! naming an operator: `if`, `for_each`, `parallel`, `do`, `abort`, `output`,
//! `verify`, `skip`, `note`, `report`, or the labeled `scenario`.

mod replay;


use crate::directive::Severity;
use crate::error::{EdictError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub use replay::{build_unit, compile_all, compile_command};

/// A parsed definition file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefinitionFile {
    /// Reusable step lists, included by name.
    pub libraries: BTreeMap<String, Vec<Step>>,
    /// Command definitions keyed by command name.
    pub commands: BTreeMap<String, CommandDef>,
}

/// One command definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommandDef {
    /// Store bindings declared before any step runs.
    pub store: Vec<BindingDef>,
    pub steps: Vec<Step>,
}

/// A store declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct BindingDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One builder call.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Include {
        include: String,
    },
    Declare {
        declare: String,
        #[serde(default)]
        description: String,
    },
    Rule(RuleDef),
    Guideline(GuidelineDef),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleDef {
    pub rule: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub text: TextList,
    #[serde(default)]
    pub why: Option<String>,
    #[serde(default)]
    pub on_violation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuidelineDef {
    pub guideline: String,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub example: bool,
    #[serde(default)]
    pub text: TextList,
    #[serde(default)]
    pub phases: Vec<PhaseDef>,
}

/// A single string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextList {
    One(String),
    Many(Vec<String>),
}

impl Default for TextList {
    fn default() -> Self {
        TextList::Many(Vec::new())
    }
}

impl TextList {
    pub fn as_slice(&self) -> &[String] {
        match self {
            TextList::One(s) => std::slice::from_ref(s),
            TextList::Many(v) => v,
        }
    }
}

/// A phase entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PhaseDef {
    Text(String),
    Seq(Vec<PhaseDef>),
    Node(NodeDef),
}

/// An operator entry (single-key map).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeDef {
    If {
        cond: String,
        then: Box<PhaseDef>,
        #[serde(default, rename = "else")]
        otherwise: Option<Box<PhaseDef>>,
    },
    ForEach {
        source: String,
        body: Box<PhaseDef>,
    },
    Parallel(Vec<PhaseDef>),
    Do(Vec<PhaseDef>),
    Abort(Option<String>),
    Output(TextList),
    Verify(TextList),
    Skip(String),
    Note(String),
    Report(String),
    Scenario(String),
}

impl DefinitionFile {
    /// Load a definition file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            EdictError::UserError(format!(
                "failed to read definition file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            EdictError::UserError(msg) => {
                EdictError::UserError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse a definition file from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(yaml).map_err(|e| {
            EdictError::UserError(format!("failed to parse definition YAML: {}", e))
        })
    }

    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn library_names(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }
}

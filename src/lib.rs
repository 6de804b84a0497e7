//! Edict: a declarative directive compiler.
//!
//! Agent command specifications are written as code: rules with a
//! severity, guidelines made of phases, pseudocode operators and a
//! per-command variable store. Each command is built into a
//! [`CompileUnit`] and rendered into one deterministic text document.
//!
//! ```
//! use edict::{CompileUnit, op};
//!
//! let mut unit = CompileUnit::new("task:validate");
//! let task = unit.declare("TASK", "The task under validation.");
//!
//! unit.rule("tests-pass")
//!     .critical()
//!     .text("All tests must pass.");
//!
//! unit.guideline("workflow")
//!     .goal(format!("Validate {}.", task))
//!     .example()
//!     .phase("Read the task file.")
//!     .phase(op::if_then_else("tests fail", "Report failures.", "Mark as validated."));
//!
//! let doc = unit.compile().unwrap();
//! assert!(doc.text.starts_with("=== RULES: CRITICAL ==="));
//! assert!(doc.text.contains("GOAL: Validate {TASK}."));
//! ```

pub mod config;
pub mod definition;
pub mod diagnostics;
pub mod directive;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod library;
pub mod logging;
pub mod operator;
pub mod phase;
pub mod render;
pub mod scan;
pub mod store;
pub mod tools;
pub mod unit;

pub use config::{CollisionPolicy, Config};
pub use diagnostics::{Diagnostic, DiagnosticKind, Level};
pub use directive::{Guideline, Rule, Severity};
pub use error::{EdictError, Result};
pub use operator::{self as op, OperatorNode};
pub use phase::PhaseContent;
pub use store::Store;
pub use unit::{CompileUnit, CompiledDocument};

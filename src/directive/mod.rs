//! Directive model: rules, guidelines, their builders and registries.
//!
//! Builders hold a mutable borrow of the node already sitting in its
//! registry, so there is no commit step: the registry always reflects the
//! builder's current state.
//!
//! ```
//! use edict::CompileUnit;
//!
//! let mut unit = CompileUnit::new("demo");
//! unit.rule("tests-pass")
//!     .critical()
//!     .text("All tests must pass.")
//!     .why("Broken builds block every other task.");
//!
//! assert_eq!(unit.rules().len(), 1);
//! ```

mod guideline;
mod registry;
mod rule;


pub use guideline::{Guideline, GuidelineBuilder, SCENARIO_LABEL};
pub use registry::{GuidelineRegistry, Keyed, Registry, RuleRegistry};
pub use rule::{Rule, RuleBuilder, Severity};

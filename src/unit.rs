//! Compile units: one command definition's registries, store and diagnostics.
//!
//! A unit is built by calling `rule`, `guideline`, store operations and
//! library functions in source order, then rendered once. Nothing is shared
//! between units.
//!
//! # Library composition
//!
//! Directive libraries are plain functions taking `&mut CompileUnit`. Calling
//! one through [`CompileUnit::compose`] runs it immediately, exactly as if
//! its calls were written inline, and records the invocation trail so
//! diagnostics raised inside can name the library chain.
//!
//! ```
//! use edict::CompileUnit;
//!
//! fn quality(unit: &mut CompileUnit) {
//!     unit.rule("tests-pass").critical().text("All tests must pass.");
//! }
//!
//! let mut unit = CompileUnit::new("task:validate");
//! unit.compose("quality", quality);
//! let doc = unit.compile().unwrap();
//! assert!(doc.text.contains("All tests must pass."));
//! ```

use crate::config::{CollisionPolicy, Config};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Level};
use crate::directive::{
    Guideline, GuidelineBuilder, GuidelineRegistry, Rule, RuleBuilder, RuleRegistry,
};
use crate::error::{EdictError, Result};
use crate::render;
use crate::store::Store;
use tracing::{debug, warn};

/// The registries, store and diagnostics belonging to one command definition.
#[derive(Debug, Clone)]
pub struct CompileUnit {
    name: String,
    policy: CollisionPolicy,
    rules: RuleRegistry,
    guidelines: GuidelineRegistry,
    store: Store,
    diagnostics: Vec<Diagnostic>,
    trail: Vec<String>,
    composed: Vec<String>,
}

/// Output of a successful compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDocument {
    /// Name of the compile unit.
    pub name: String,
    /// The rendered document.
    pub text: String,
    /// Warnings collected while the unit was defined.
    pub diagnostics: Vec<Diagnostic>,
    pub rule_count: usize,
    pub guideline_count: usize,
}

impl CompiledDocument {
    /// Number of unresolved store references among the diagnostics.
    pub fn unresolved_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::UnresolvedReference { .. }))
            .count()
    }
}

impl CompileUnit {
    /// Create an empty unit with the default collision policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            policy: CollisionPolicy::default(),
            rules: RuleRegistry::new(),
            guidelines: GuidelineRegistry::new(),
            store: Store::new(),
            diagnostics: Vec::new(),
            trail: Vec::new(),
            composed: Vec::new(),
        }
    }

    /// Create an empty unit using the settings from `config`.
    pub fn with_config(name: impl Into<String>, config: &Config) -> Self {
        Self::new(name).with_policy(config.collision_policy)
    }

    pub fn with_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Register a rule and return its builder.
    ///
    /// An existing rule with the same key is replaced and the collision is
    /// handled according to the unit's policy.
    pub fn rule(&mut self, key: impl Into<String>) -> RuleBuilder<'_> {
        let key = key.into();
        if self.rules.contains(&key) {
            self.collision(DiagnosticKind::RuleCollision { key: key.clone() });
        }

        let (rule, _) = self.rules.insert(Rule::new(key));
        RuleBuilder::new(rule, &mut self.store)
    }

    /// Register a guideline and return its builder.
    ///
    /// Duplicate keys follow the same policy as rules, so a library invoked
    /// twice never appends its phases twice.
    pub fn guideline(&mut self, key: impl Into<String>) -> GuidelineBuilder<'_> {
        let key = key.into();
        if self.guidelines.contains(&key) {
            self.collision(DiagnosticKind::GuidelineCollision { key: key.clone() });
        }

        let (guideline, _) = self.guidelines.insert(Guideline::new(key));
        GuidelineBuilder::new(guideline, &mut self.store)
    }

    /// Declare a store binding. See [`Store::declare`].
    pub fn declare(&mut self, name: &str, description: impl Into<String>) -> String {
        self.store.declare(name, description)
    }

    /// Reference a store binding. See [`Store::reference`].
    pub fn reference(&mut self, name: &str) -> String {
        self.store.reference(name)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Run a directive library against this unit.
    pub fn compose<F>(&mut self, library: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut CompileUnit),
    {
        debug!(unit = %self.name, library, depth = self.trail.len(), "composing library");
        self.trail.push(library.to_string());
        self.composed.push(self.trail.join(" > "));
        self.store.set_via(&self.trail);
        f(self);
        self.trail.pop();
        self.store.set_via(&self.trail);
        self
    }

    /// Whether `library` is currently being composed (directly or further up
    /// the chain).
    pub fn is_composing(&self, library: &str) -> bool {
        self.trail.iter().any(|name| name == library)
    }

    /// Libraries currently being composed, outermost first.
    pub fn trail(&self) -> &[String] {
        &self.trail
    }

    /// Every library invocation so far, as `outer > inner` paths.
    pub fn composed(&self) -> &[String] {
        &self.composed
    }

    /// Record a diagnostic raised while defining this unit.
    pub fn record(&mut self, level: Level, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(level, kind).with_via(self.trail.clone());
        match level {
            Level::Error => warn!(unit = %self.name, "{}", diagnostic),
            Level::Warning => debug!(unit = %self.name, "{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    fn collision(&mut self, kind: DiagnosticKind) {
        match self.policy {
            CollisionPolicy::Error => self.record(Level::Error, kind),
            CollisionPolicy::Warn => {
                warn!(unit = %self.name, ?kind, "key collision, keeping latest");
                self.record(Level::Warning, kind);
            }
            CollisionPolicy::Overwrite => {
                debug!(unit = %self.name, ?kind, "key overwritten");
            }
        }
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn guidelines(&self) -> &GuidelineRegistry {
        &self.guidelines
    }

    /// All diagnostics: definition diagnostics in the order raised, then one
    /// unresolved-reference warning per store lint.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let lints = self.store.lints().iter().map(|lint| {
            Diagnostic::new(
                Level::Warning,
                DiagnosticKind::UnresolvedReference {
                    name: lint.name.clone(),
                },
            )
            .with_via(lint.via.clone())
        });
        self.diagnostics.iter().cloned().chain(lints).collect()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Render the current registries. Never fails.
    pub fn render(&self) -> String {
        render::render(&self.rules, &self.guidelines)
    }

    /// Render the unit, failing if any error-level diagnostic was recorded.
    ///
    /// Consumes the unit; it is discarded once the document exists.
    pub fn compile(self) -> Result<CompiledDocument> {
        if self.has_errors() {
            let errors: Vec<String> = self
                .diagnostics
                .iter()
                .filter(|d| d.is_error())
                .map(|d| d.to_string())
                .collect();
            return Err(EdictError::DefinitionError(format!(
                "'{}' has {} error(s):\n  {}",
                self.name,
                errors.len(),
                errors.join("\n  ")
            )));
        }

        let text = self.render();
        debug!(unit = %self.name, bytes = text.len(), "rendered document");
        Ok(CompiledDocument {
            diagnostics: self.diagnostics(),
            rule_count: self.rules.len(),
            guideline_count: self.guidelines.len(),
            name: self.name,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::Severity;
    use crate::operator as op;

    fn workflow_unit() -> CompileUnit {
        let mut unit = CompileUnit::new("task:validate");
        let task = unit.declare("TASK", "The task under validation.");

        unit.rule("tests-pass")
            .critical()
            .text("All tests must pass.")
            .why("Broken builds block every other task.");
        unit.rule("be-brief")
            .low()
            .text(format!("Summarize {} in one line.", task));

        unit.guideline("workflow")
            .goal("Validate the task.")
            .example()
            .phase("Read {$TASK}.")
            .phase(op::parallel(["Run unit tests", "Run lints"]))
            .phase(op::if_then_else("tests fail", "Report failures.", "Mark as validated."));
        unit
    }

    #[test]
    fn test_same_calls_compile_to_identical_bytes() {
        let first = workflow_unit().compile().unwrap();
        let second = workflow_unit().compile().unwrap();
        assert_eq!(first.text, second.text);
        assert_eq!(first.rule_count, 2);
        assert_eq!(first.guideline_count, 1);
    }

    #[test]
    fn test_last_severity_setter_wins() {
        let mut unit = CompileUnit::new("t");
        unit.rule("x").critical().high();
        assert_eq!(unit.rules().get("x").unwrap().severity, Severity::High);

        let doc = unit.compile().unwrap();
        assert!(doc.text.contains("=== RULES: HIGH ==="));
        assert!(!doc.text.contains("CRITICAL"));
    }

    #[test]
    fn test_units_do_not_share_keys() {
        let mut a = CompileUnit::new("a");
        let mut b = CompileUnit::new("b");
        a.rule("x").text("from a");
        b.rule("x").text("from b");

        let doc_a = a.compile().unwrap();
        let doc_b = b.compile().unwrap();
        assert!(doc_a.text.contains("from a") && !doc_a.text.contains("from b"));
        assert!(doc_b.text.contains("from b") && !doc_b.text.contains("from a"));
    }

    #[test]
    fn test_duplicate_key_follows_policy() {
        let mut strict = CompileUnit::new("t");
        strict.rule("x").text("one");
        strict.rule("x").text("two");
        assert!(strict.has_errors());
        let err = strict.compile().unwrap_err();
        assert!(matches!(err, EdictError::DefinitionError(_)));

        let mut lenient = CompileUnit::new("t").with_policy(CollisionPolicy::Warn);
        lenient.rule("x").text("one");
        lenient.rule("x").text("two");
        let doc = lenient.compile().unwrap();
        assert_eq!(doc.diagnostics.len(), 1);
        assert!(doc.text.contains("- [x] two"));
        assert!(!doc.text.contains("one"));
    }

    #[test]
    fn test_store_tokens_are_stable() {
        let mut unit = CompileUnit::new("t");
        let declared = unit.declare("T", "desc");
        assert_eq!(unit.reference("T"), declared);
        assert_eq!(unit.reference("{$T}"), declared);
        assert!(unit.diagnostics().is_empty());
    }

    #[test]
    fn test_dangling_reference_is_a_single_lint() {
        let mut unit = CompileUnit::new("t");
        let token = unit.reference("UNKNOWN");
        assert!(token.contains("?unresolved"));

        unit.rule("r").text(format!("Write to {}.", token));
        let doc = unit.compile().unwrap();

        assert_eq!(doc.diagnostics.len(), 1);
        let diagnostic = &doc.diagnostics[0];
        assert!(!diagnostic.is_error());
        assert_eq!(
            diagnostic.kind,
            DiagnosticKind::UnresolvedReference {
                name: "UNKNOWN".to_string()
            }
        );
        assert_eq!(doc.unresolved_count(), 1);
    }

    #[test]
    fn test_unresolved_reference_carries_library_trail() {
        fn inner(unit: &mut CompileUnit) {
            unit.rule("r").text("Send to {$MISSING}.");
        }
        fn outer(unit: &mut CompileUnit) {
            unit.compose("inner", inner);
        }

        let mut unit = CompileUnit::new("t");
        unit.compose("outer", outer);
        unit.reference("TOP_LEVEL");

        let diagnostics = unit.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].via, vec!["outer", "inner"]);
        assert!(diagnostics[0].to_string().contains("(via outer > inner)"));
        assert!(diagnostics[1].via.is_empty());
    }

    #[test]
    fn test_compose_records_trail_and_restores_it() {
        fn inner(unit: &mut CompileUnit) {
            assert!(unit.is_composing("outer"));
            assert_eq!(unit.trail(), ["outer", "inner"]);
        }

        let mut unit = CompileUnit::new("t");
        unit.compose("outer", |u| {
            u.compose("inner", inner);
        });

        assert!(unit.trail().is_empty());
        assert_eq!(unit.composed(), ["outer", "outer > inner"]);
    }
}

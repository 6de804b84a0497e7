//! Rules: named, severity-tagged behavioral constraints.

use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule severity. Declaration order is render order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl Severity {
    /// All severities in render order.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Upper-case label used in section headers.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// A named behavioral constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Unique within one compile unit.
    pub key: String,
    pub severity: Severity,
    /// Body text. Successive `text` calls are joined with newlines.
    pub body: String,
    pub rationale: Option<String>,
    pub violation_text: Option<String>,
}

impl Rule {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            severity: Severity::default(),
            body: String::new(),
            rationale: None,
            violation_text: None,
        }
    }
}

/// Chainable setters over a rule already held by its registry.
///
/// Text payloads pass through the unit's store, so `{$NAME}` references are
/// normalized before they are stored.
pub struct RuleBuilder<'a> {
    rule: &'a mut Rule,
    store: &'a mut Store,
}

impl<'a> RuleBuilder<'a> {
    pub(crate) fn new(rule: &'a mut Rule, store: &'a mut Store) -> Self {
        Self { rule, store }
    }

    /// Set the severity. The last setter wins.
    pub fn severity(&mut self, severity: Severity) -> &mut Self {
        self.rule.severity = severity;
        self
    }

    pub fn critical(&mut self) -> &mut Self {
        self.severity(Severity::Critical)
    }

    pub fn high(&mut self) -> &mut Self {
        self.severity(Severity::High)
    }

    pub fn medium(&mut self) -> &mut Self {
        self.severity(Severity::Medium)
    }

    pub fn low(&mut self) -> &mut Self {
        self.severity(Severity::Low)
    }

    /// Append to the body. Earlier text is kept.
    pub fn text(&mut self, body: impl AsRef<str>) -> &mut Self {
        let body = self.store.resolve_text(body.as_ref());
        if body.is_empty() {
            return self;
        }
        if !self.rule.body.is_empty() {
            self.rule.body.push('\n');
        }
        self.rule.body.push_str(&body);
        self
    }

    /// Set the rationale, replacing any earlier one.
    pub fn why(&mut self, rationale: impl AsRef<str>) -> &mut Self {
        self.rule.rationale = Some(self.store.resolve_text(rationale.as_ref()));
        self
    }

    /// Set the violation text, replacing any earlier one.
    pub fn on_violation(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.rule.violation_text = Some(self.store.resolve_text(text.as_ref()));
        self
    }

    /// Current state of the rule.
    pub fn get(&self) -> &Rule {
        self.rule
    }
}

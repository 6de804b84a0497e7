//! Guidelines: goal-oriented blocks of ordered phases.

use crate::phase::PhaseContent;
use crate::store::Store;

/// Prefix of the leaf added by [`GuidelineBuilder::scenario`].
pub const SCENARIO_LABEL: &str = "SCENARIO:";

/// A named block of ordered phases.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Guideline {
    pub key: String,
    pub goal: Option<String>,
    /// Example guidelines render their phases as a numbered procedure.
    pub is_example: bool,
    /// Descriptive, non-procedural lines rendered before the phases.
    pub description: Vec<String>,
    /// Phases in insertion order.
    pub phases: Vec<PhaseContent>,
}

impl Guideline {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }
}

/// Chainable setters over a guideline already held by its registry.
pub struct GuidelineBuilder<'a> {
    guideline: &'a mut Guideline,
    store: &'a mut Store,
}

impl<'a> GuidelineBuilder<'a> {
    pub(crate) fn new(guideline: &'a mut Guideline, store: &'a mut Store) -> Self {
        Self { guideline, store }
    }

    /// Set the goal, replacing any earlier one.
    pub fn goal(&mut self, goal: impl AsRef<str>) -> &mut Self {
        self.guideline.goal = Some(self.store.resolve_text(goal.as_ref()));
        self
    }

    /// Render phases as a numbered procedure.
    pub fn example(&mut self) -> &mut Self {
        self.guideline.is_example = true;
        self
    }

    /// Append one phase. Strings become leaves, vectors and arrays become
    /// sequences.
    pub fn phase(&mut self, content: impl Into<PhaseContent>) -> &mut Self {
        let mut content = content.into();
        let store = &mut *self.store;
        content.visit_text_mut(&mut |text| {
            if text.contains("{$") {
                *text = store.resolve_text(text);
            }
        });
        self.guideline.phases.push(content);
        self
    }

    /// Append several items as one sequential phase.
    pub fn steps<I, T>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<PhaseContent>,
    {
        let items: Vec<PhaseContent> = items.into_iter().map(Into::into).collect();
        self.phase(PhaseContent::Seq(items))
    }

    /// Append a labeled example phase.
    pub fn scenario(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.phase(format!("{} {}", SCENARIO_LABEL, text.as_ref()))
    }

    /// Append a descriptive line.
    pub fn text(&mut self, line: impl AsRef<str>) -> &mut Self {
        let line = self.store.resolve_text(line.as_ref());
        self.guideline.description.push(line);
        self
    }

    /// Current state of the guideline.
    pub fn get(&self) -> &Guideline {
        self.guideline
    }
}

//! Phase content: the recursive step type stored in guidelines.
//!
//! A phase is literal text, an operator node, or a nested sequence of
//! phases. Content is built top-down at definition time, so the tree is
//! always finite.

use crate::operator::OperatorNode;

/// One step of a guideline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseContent {
    /// Literal text. May span several lines.
    Leaf(String),
    /// A control construct rendered as pseudocode.
    Node(OperatorNode),
    /// Nested phases rendered one after another.
    Seq(Vec<PhaseContent>),
}

impl PhaseContent {
    /// Wrap text as a leaf.
    pub fn leaf(text: impl Into<String>) -> Self {
        PhaseContent::Leaf(text.into())
    }

    /// Visit every text payload in the tree, including operator conditions,
    /// sources and labels.
    pub fn visit_text_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        match self {
            PhaseContent::Leaf(text) => f(text),
            PhaseContent::Node(node) => node.visit_text_mut(f),
            PhaseContent::Seq(items) => {
                for item in items {
                    item.visit_text_mut(f);
                }
            }
        }
    }
}

impl From<&str> for PhaseContent {
    fn from(text: &str) -> Self {
        PhaseContent::Leaf(text.to_string())
    }
}

impl From<String> for PhaseContent {
    fn from(text: String) -> Self {
        PhaseContent::Leaf(text)
    }
}

impl From<&String> for PhaseContent {
    fn from(text: &String) -> Self {
        PhaseContent::Leaf(text.clone())
    }
}

impl From<OperatorNode> for PhaseContent {
    fn from(node: OperatorNode) -> Self {
        PhaseContent::Node(node)
    }
}

impl<T: Into<PhaseContent>> From<Vec<T>> for PhaseContent {
    fn from(items: Vec<T>) -> Self {
        PhaseContent::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PhaseContent>, const N: usize> From<[T; N]> for PhaseContent {
    fn from(items: [T; N]) -> Self {
        PhaseContent::Seq(items.into_iter().map(Into::into).collect())
    }
}

/// Build a `PhaseContent::Seq` from mixed items (text and operator nodes).
///
/// ```
/// use edict::{op, seq, PhaseContent};
///
/// let content = seq!["read the task", op::note("keep it short")];
/// assert!(matches!(content, PhaseContent::Seq(ref items) if items.len() == 2));
/// ```
#[macro_export]
macro_rules! seq {
    ($($item:expr),* $(,)?) => {
        $crate::PhaseContent::Seq(vec![$($crate::PhaseContent::from($item)),*])
    };
}

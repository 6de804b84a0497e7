//! Operator AST: control constructs rendered purely as text.
//!
//! Nothing here is ever evaluated. A condition is an opaque string and a body
//! is opaque phase content; the renderer turns both into pseudocode for the
//! agent runtime that later reads the document. Every constructor is pure and
//! accepts any shape without validation.

use crate::phase::PhaseContent;

/// A control construct inside a guideline phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorNode {
    /// `IF <cond> THEN <then>` with an optional `ELSE <otherwise>` line.
    If {
        cond: String,
        then: Box<PhaseContent>,
        otherwise: Option<Box<PhaseContent>>,
    },
    /// `FOR EACH <source>:` followed by the indented body.
    ForEach {
        source: String,
        body: Box<PhaseContent>,
    },
    /// Branches dispatched together by the agent runtime.
    Parallel(Vec<PhaseContent>),
    /// Items performed in order, rendered as bullets.
    Do(Vec<PhaseContent>),
    /// Stop the procedure, optionally with a message.
    Abort(Option<String>),
    /// Lines the agent must emit verbatim.
    Output(Vec<String>),
    /// Assertions the agent must check.
    Verify(Vec<String>),
    /// A step the agent may skip.
    Skip(String),
    /// Informational remark.
    Note(String),
    /// Something the agent reports back.
    Report(String),
}

impl OperatorNode {
    /// Visit every text payload held by this node and its children.
    pub fn visit_text_mut(&mut self, f: &mut dyn FnMut(&mut String)) {
        match self {
            OperatorNode::If {
                cond,
                then,
                otherwise,
            } => {
                f(cond);
                then.visit_text_mut(f);
                if let Some(otherwise) = otherwise {
                    otherwise.visit_text_mut(f);
                }
            }
            OperatorNode::ForEach { source, body } => {
                f(source);
                body.visit_text_mut(f);
            }
            OperatorNode::Parallel(items) | OperatorNode::Do(items) => {
                for item in items {
                    item.visit_text_mut(f);
                }
            }
            OperatorNode::Abort(msg) => {
                if let Some(msg) = msg {
                    f(msg);
                }
            }
            OperatorNode::Output(lines) | OperatorNode::Verify(lines) => {
                for line in lines {
                    f(line);
                }
            }
            OperatorNode::Skip(text) | OperatorNode::Note(text) | OperatorNode::Report(text) => {
                f(text)
            }
        }
    }
}

/// `IF cond THEN then`.
pub fn if_then(cond: impl Into<String>, then: impl Into<PhaseContent>) -> OperatorNode {
    OperatorNode::If {
        cond: cond.into(),
        then: Box::new(then.into()),
        otherwise: None,
    }
}

/// `IF cond THEN then` / `ELSE otherwise`.
pub fn if_then_else(
    cond: impl Into<String>,
    then: impl Into<PhaseContent>,
    otherwise: impl Into<PhaseContent>,
) -> OperatorNode {
    OperatorNode::If {
        cond: cond.into(),
        then: Box::new(then.into()),
        otherwise: Some(Box::new(otherwise.into())),
    }
}

/// `FOR EACH source:` with an indented body.
pub fn for_each(source: impl Into<String>, body: impl Into<PhaseContent>) -> OperatorNode {
    OperatorNode::ForEach {
        source: source.into(),
        body: Box::new(body.into()),
    }
}

/// Concurrent branches. Each item becomes one branch block.
pub fn parallel<I, T>(branches: I) -> OperatorNode
where
    I: IntoIterator<Item = T>,
    T: Into<PhaseContent>,
{
    OperatorNode::Parallel(branches.into_iter().map(Into::into).collect())
}

/// Sequential bullet list.
pub fn do_all<I, T>(items: I) -> OperatorNode
where
    I: IntoIterator<Item = T>,
    T: Into<PhaseContent>,
{
    OperatorNode::Do(items.into_iter().map(Into::into).collect())
}

/// Bare `ABORT`.
pub fn abort() -> OperatorNode {
    OperatorNode::Abort(None)
}

/// `ABORT: msg`.
pub fn abort_with(msg: impl Into<String>) -> OperatorNode {
    OperatorNode::Abort(Some(msg.into()))
}

pub fn output<I, S>(lines: I) -> OperatorNode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OperatorNode::Output(lines.into_iter().map(Into::into).collect())
}

pub fn verify<I, S>(assertions: I) -> OperatorNode
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OperatorNode::Verify(assertions.into_iter().map(Into::into).collect())
}

pub fn skip(label: impl Into<String>) -> OperatorNode {
    OperatorNode::Skip(label.into())
}

pub fn note(text: impl Into<String>) -> OperatorNode {
    OperatorNode::Note(text.into())
}

pub fn report(text: impl Into<String>) -> OperatorNode {
    OperatorNode::Report(text.into())
}

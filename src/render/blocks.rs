//! Line-block rendering for phase content and operator nodes.
//!
//! Every renderer here returns a block of lines with relative indentation.
//! Callers attach prefixes (`1. `, `- `, `IF c THEN `) with [`prefixed`],
//! which aligns continuation lines under the first line's text.

use crate::operator::OperatorNode;
use crate::phase::PhaseContent;

/// Annotation emitted once after the branches of every parallel block.
pub const PARALLEL_ANNOTATION: &str =
    "ALL BRANCHES RUN CONCURRENTLY — WAIT FOR ALL BEFORE CONTINUING.";

/// Render one phase. Depth-first; sequences stack their children.
pub(crate) fn phase_lines(content: &PhaseContent) -> Vec<String> {
    match content {
        PhaseContent::Leaf(text) => text_lines(text),
        PhaseContent::Node(node) => operator_lines(node),
        PhaseContent::Seq(items) => items.iter().flat_map(phase_lines).collect(),
    }
}

fn operator_lines(node: &OperatorNode) -> Vec<String> {
    match node {
        OperatorNode::If {
            cond,
            then,
            otherwise,
        } => {
            let mut lines = prefixed(&format!("IF {} THEN ", cond), phase_lines(then));
            if let Some(otherwise) = otherwise {
                lines.extend(prefixed("ELSE ", phase_lines(otherwise)));
            }
            lines
        }
        OperatorNode::ForEach { source, body } => {
            let mut lines = vec![format!("FOR EACH {}:", source)];
            lines.extend(indent(phase_lines(body), 2));
            lines
        }
        OperatorNode::Parallel(branches) => {
            if branches.is_empty() {
                return Vec::new();
            }
            let mut lines = vec!["PARALLEL:".to_string()];
            for (i, branch) in branches.iter().enumerate() {
                let block = prefixed(&format!("[BRANCH {}] ", i + 1), phase_lines(branch));
                lines.extend(indent(block, 2));
            }
            lines.push(PARALLEL_ANNOTATION.to_string());
            lines
        }
        OperatorNode::Do(items) => items
            .iter()
            .map(phase_lines)
            .filter(|block| !block.is_empty())
            .flat_map(|block| prefixed("- ", block))
            .collect(),
        OperatorNode::Abort(None) => vec!["ABORT".to_string()],
        OperatorNode::Abort(Some(msg)) => prefixed("ABORT: ", text_lines(msg)),
        OperatorNode::Output(items) => labeled_list("OUTPUT:", items, ""),
        OperatorNode::Verify(items) => labeled_list("VERIFY:", items, "- "),
        OperatorNode::Skip(label) => prefixed("SKIP: ", text_lines(label)),
        OperatorNode::Note(text) => prefixed("NOTE: ", text_lines(text)),
        OperatorNode::Report(text) => prefixed("REPORT: ", text_lines(text)),
    }
}

/// `LABEL` followed by each item indented under it. Empty lists render nothing.
fn labeled_list(label: &str, items: &[String], bullet: &str) -> Vec<String> {
    let body: Vec<String> = items
        .iter()
        .map(|item| text_lines(item))
        .filter(|block| !block.is_empty())
        .flat_map(|block| {
            if bullet.is_empty() {
                block
            } else {
                prefixed(bullet, block)
            }
        })
        .collect();

    if body.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![label.to_string()];
    lines.extend(indent(body, 2));
    lines
}

/// Split text into lines. Empty text is an empty block.
pub(crate) fn text_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.lines().map(str::to_string).collect()
}

/// Attach `prefix` to the first line and align the rest under it.
///
/// An empty block becomes the prefix alone, without trailing whitespace.
pub(crate) fn prefixed(prefix: &str, block: Vec<String>) -> Vec<String> {
    if block.is_empty() {
        return vec![prefix.trim_end().to_string()];
    }

    let width = prefix.chars().count();
    block
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{}{}", prefix, line).trim_end().to_string()
            } else if line.is_empty() {
                line
            } else {
                format!("{}{}", " ".repeat(width), line)
            }
        })
        .collect()
}

/// Indent every non-empty line by `width` spaces.
pub(crate) fn indent(block: Vec<String>, width: usize) -> Vec<String> {
    let pad = " ".repeat(width);
    block
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect()
}

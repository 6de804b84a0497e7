//! Renderer: populated registries in, one text document out.
//!
//! # Document layout
//!
//! ```text
//! === RULES: CRITICAL ===
//! - [tests-pass] All tests must pass.
//!   WHY: Broken builds block every other task.
//!   ON VIOLATION: Stop and fix the failing tests.
//!
//! === GUIDELINE: workflow ===
//! GOAL: Validate the task.
//! 1. Read the task.
//! 2. IF tests fail THEN report failures
//!    ELSE mark as validated
//! ```
//!
//! Rules are grouped by severity (Critical, High, Medium, Low), keeping
//! insertion order inside each group; empty groups are omitted. Guidelines
//! follow in insertion order, except that the guideline keyed
//! [`RESERVED_LAST_GUIDELINE`] always comes last. That is the only ordering
//! exception.
//!
//! Rendering is pure and total: the same registries always produce the same
//! bytes, and empty registries produce the empty string.

mod blocks;


use crate::directive::{Guideline, GuidelineRegistry, Rule, RuleRegistry, Severity};
use blocks::{indent, phase_lines, prefixed, text_lines};

pub use blocks::PARALLEL_ANNOTATION;

/// Guideline key rendered after every other guideline.
pub const RESERVED_LAST_GUIDELINE: &str = "error-handling";

/// Render both registries into the final document.
pub fn render(rules: &RuleRegistry, guidelines: &GuidelineRegistry) -> String {
    let mut sections: Vec<String> = Vec::new();

    for severity in Severity::ALL {
        let bucket: Vec<&Rule> = rules.iter().filter(|r| r.severity == severity).collect();
        if bucket.is_empty() {
            continue;
        }

        let mut lines = vec![header(&format!("RULES: {}", severity.label()))];
        for rule in bucket {
            lines.extend(rule_lines(rule));
        }
        sections.push(lines.join("\n"));
    }

    let (reserved, regular): (Vec<&Guideline>, Vec<&Guideline>) = guidelines
        .iter()
        .partition(|g| g.key == RESERVED_LAST_GUIDELINE);
    for guideline in regular.into_iter().chain(reserved) {
        sections.push(guideline_lines(guideline).join("\n"));
    }

    if sections.is_empty() {
        return String::new();
    }

    let mut document = sections.join("\n\n");
    document.push('\n');
    document
}

fn header(title: &str) -> String {
    format!("=== {} ===", title)
}

fn rule_lines(rule: &Rule) -> Vec<String> {
    let head = format!("- [{}]", rule.key);
    let body = text_lines(&rule.body);

    let mut lines = Vec::new();
    let mut rest = Vec::new();
    match body.split_first() {
        Some((first, tail)) => {
            lines.push(format!("{} {}", head, first));
            rest.extend_from_slice(tail);
        }
        None => lines.push(head),
    }

    if let Some(rationale) = &rule.rationale {
        rest.extend(prefixed("WHY: ", text_lines(rationale)));
    }
    if let Some(violation) = &rule.violation_text {
        rest.extend(prefixed("ON VIOLATION: ", text_lines(violation)));
    }

    lines.extend(indent(rest, 2));
    lines
}

fn guideline_lines(guideline: &Guideline) -> Vec<String> {
    let mut lines = vec![header(&format!("GUIDELINE: {}", guideline.key))];

    if let Some(goal) = &guideline.goal {
        lines.extend(prefixed("GOAL: ", text_lines(goal)));
    }
    for line in &guideline.description {
        lines.extend(text_lines(line));
    }

    let phases = guideline
        .phases
        .iter()
        .map(phase_lines)
        .filter(|block| !block.is_empty());

    if guideline.is_example {
        for (i, block) in phases.enumerate() {
            lines.extend(prefixed(&format!("{}. ", i + 1), block));
        }
    } else {
        for block in phases {
            lines.extend(prefixed("- ", block));
        }
    }

    lines
}

//! Replaying definition steps against the builder API.

use super::{CommandDef, DefinitionFile, GuidelineDef, NodeDef, PhaseDef, RuleDef, Step};
use crate::config::Config;
use crate::diagnostics::{DiagnosticKind, Level};
use crate::directive::SCENARIO_LABEL;
use crate::error::{EdictError, Result};
use crate::library::{self, BUILTIN_PREFIX};
use crate::operator as op;
use crate::phase::PhaseContent;
use crate::unit::{CompileUnit, CompiledDocument};
use tracing::debug;

/// Build the compile unit for one command.
pub fn build_unit(
    file: &DefinitionFile,
    name: &str,
    command: &CommandDef,
    config: &Config,
) -> CompileUnit {
    let mut unit = CompileUnit::with_config(name, config);

    for binding in &command.store {
        unit.declare(&binding.name, binding.description.as_str());
    }
    apply_steps(&mut unit, file, &command.steps);

    debug!(
        command = name,
        rules = unit.rules().len(),
        guidelines = unit.guidelines().len(),
        "built compile unit"
    );
    unit
}

/// Build and compile one named command.
pub fn compile_command(
    file: &DefinitionFile,
    name: &str,
    config: &Config,
) -> Result<CompiledDocument> {
    let command = file.commands.get(name).ok_or_else(|| {
        let known: Vec<&str> = file.command_names().collect();
        EdictError::UserError(format!(
            "command '{}' not found. Known commands: {}",
            name,
            if known.is_empty() {
                "(none)".to_string()
            } else {
                known.join(", ")
            }
        ))
    })?;

    build_unit(file, name, command, config).compile()
}

/// Build every command in the file, in name order.
///
/// Units are independent; a failing unit does not affect the others.
pub fn compile_all(
    file: &DefinitionFile,
    config: &Config,
) -> Vec<(String, Result<CompiledDocument>)> {
    file.commands
        .iter()
        .map(|(name, command)| {
            let result = build_unit(file, name, command, config).compile();
            (name.clone(), result)
        })
        .collect()
}

fn apply_steps(unit: &mut CompileUnit, file: &DefinitionFile, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Include { include } => include_library(unit, file, include),
            Step::Declare {
                declare,
                description,
            } => {
                unit.declare(declare, description.as_str());
            }
            Step::Rule(def) => apply_rule(unit, def),
            Step::Guideline(def) => apply_guideline(unit, def),
        }
    }
}

fn include_library(unit: &mut CompileUnit, file: &DefinitionFile, name: &str) {
    if unit.is_composing(name) {
        let mut chain = unit.trail().to_vec();
        chain.push(name.to_string());
        unit.record(Level::Error, DiagnosticKind::LibraryCycle { chain });
        return;
    }

    if let Some(builtin_name) = name.strip_prefix(BUILTIN_PREFIX) {
        match library::builtin(builtin_name) {
            Some(f) => {
                unit.compose(name, f);
            }
            None => unit.record(
                Level::Error,
                DiagnosticKind::UnknownLibrary {
                    name: name.to_string(),
                },
            ),
        }
        return;
    }

    match file.libraries.get(name) {
        Some(steps) => {
            unit.compose(name, |unit| apply_steps(unit, file, steps));
        }
        None => unit.record(
            Level::Error,
            DiagnosticKind::UnknownLibrary {
                name: name.to_string(),
            },
        ),
    }
}

fn apply_rule(unit: &mut CompileUnit, def: &RuleDef) {
    let mut rule = unit.rule(def.rule.as_str());
    if let Some(severity) = def.severity {
        rule.severity(severity);
    }
    for text in def.text.as_slice() {
        rule.text(text);
    }
    if let Some(why) = &def.why {
        rule.why(why);
    }
    if let Some(on_violation) = &def.on_violation {
        rule.on_violation(on_violation);
    }
}

fn apply_guideline(unit: &mut CompileUnit, def: &GuidelineDef) {
    let mut guideline = unit.guideline(def.guideline.as_str());
    if let Some(goal) = &def.goal {
        guideline.goal(goal);
    }
    if def.example {
        guideline.example();
    }
    for line in def.text.as_slice() {
        guideline.text(line);
    }
    for phase in &def.phases {
        guideline.phase(phase_content(phase));
    }
}

fn phase_content(def: &PhaseDef) -> PhaseContent {
    match def {
        PhaseDef::Text(text) => PhaseContent::leaf(text.as_str()),
        PhaseDef::Seq(items) => PhaseContent::Seq(items.iter().map(phase_content).collect()),
        PhaseDef::Node(node) => node_content(node),
    }
}

fn node_content(def: &NodeDef) -> PhaseContent {
    let node = match def {
        NodeDef::Scenario(text) => {
            return PhaseContent::leaf(format!("{} {}", SCENARIO_LABEL, text));
        }
        NodeDef::If {
            cond,
            then,
            otherwise: Some(otherwise),
        } => op::if_then_else(cond.as_str(), phase_content(then), phase_content(otherwise)),
        NodeDef::If {
            cond,
            then,
            otherwise: None,
        } => op::if_then(cond.as_str(), phase_content(then)),
        NodeDef::ForEach { source, body } => op::for_each(source.as_str(), phase_content(body)),
        NodeDef::Parallel(branches) => op::parallel(branches.iter().map(phase_content)),
        NodeDef::Do(items) => op::do_all(items.iter().map(phase_content)),
        NodeDef::Abort(None) => op::abort(),
        NodeDef::Abort(Some(msg)) => op::abort_with(msg.as_str()),
        NodeDef::Output(lines) => op::output(lines.as_slice().iter().map(String::as_str)),
        NodeDef::Verify(lines) => op::verify(lines.as_slice().iter().map(String::as_str)),
        NodeDef::Skip(label) => op::skip(label.as_str()),
        NodeDef::Note(text) => op::note(text.as_str()),
        NodeDef::Report(text) => op::report(text.as_str()),
    };
    PhaseContent::Node(node)
}

//! Implementation of the `edict lint` command.

use super::RunContext;
use crate::cli::LintArgs;
use edict::definition::{DefinitionFile, build_unit};
use edict::diagnostics::{Diagnostic, DiagnosticKind};
use edict::error::{EdictError, Result};
use edict::events::{Event, EventAction};
use serde::Serialize;
use serde_json::json;

/// Diagnostics for one command, as printed with `--json`.
#[derive(Debug, Serialize)]
struct CommandReport {
    file: String,
    command: String,
    diagnostics: Vec<Diagnostic>,
}

/// Execute the `edict lint` command.
pub fn cmd_lint(ctx: &RunContext, args: LintArgs) -> Result<()> {
    let mut reports = Vec::new();

    for path in &args.files {
        let file = DefinitionFile::load(ctx.path(path))?;
        for (name, command) in &file.commands {
            let unit = build_unit(&file, name, command, &ctx.config);
            let diagnostics = unit.diagnostics();

            ctx.log_event(
                &Event::new(EventAction::Lint)
                    .with_command(name.as_str())
                    .with_details(json!({
                        "file": path.display().to_string(),
                        "diagnostics": diagnostics.len(),
                    })),
            )?;

            reports.push(CommandReport {
                file: path.display().to_string(),
                command: name.clone(),
                diagnostics,
            });
        }
    }

    if args.json {
        let out = serde_json::to_string_pretty(&reports).map_err(|e| {
            EdictError::UserError(format!("failed to serialize diagnostics: {}", e))
        })?;
        println!("{}", out);
    } else {
        for report in &reports {
            for diagnostic in &report.diagnostics {
                println!("{}:{}: {}", report.file, report.command, diagnostic);
            }
        }
    }

    let all = || reports.iter().flat_map(|r| r.diagnostics.iter());
    let errors = all().filter(|d| d.is_error()).count();
    let unresolved = all()
        .filter(|d| matches!(d.kind, DiagnosticKind::UnresolvedReference { .. }))
        .count();

    if !args.json {
        println!(
            "{} command(s) checked: {} error(s), {} unresolved reference(s)",
            reports.len(),
            errors,
            unresolved
        );
    }

    if errors > 0 {
        return Err(EdictError::DefinitionError(format!(
            "{} error(s) found",
            errors
        )));
    }
    if ctx.config.fail_on_unresolved && unresolved > 0 {
        return Err(EdictError::LintFailure(format!(
            "{} unresolved reference(s) found",
            unresolved
        )));
    }

    Ok(())
}

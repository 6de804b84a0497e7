//! Implementation of the `edict render` command.
//!
//! Compiles commands from a definition file and writes one document per
//! command. A failing command does not stop the others; failures are
//! reported together at the end.

use super::RunContext;
use crate::cli::RenderArgs;
use edict::definition::{DefinitionFile, build_unit};
use edict::error::{EdictError, Result};
use edict::events::{Event, EventAction};
use edict::unit::CompiledDocument;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Execute the `edict render` command.
pub fn cmd_render(ctx: &RunContext, args: RenderArgs) -> Result<()> {
    let file = DefinitionFile::load(ctx.path(&args.file))?;

    let names: Vec<String> = match &args.command {
        Some(name) => {
            if !file.commands.contains_key(name) {
                return Err(EdictError::UserError(format!(
                    "command '{}' not found in '{}'",
                    name,
                    args.file.display()
                )));
            }
            vec![name.clone()]
        }
        None => file.command_names().map(str::to_string).collect(),
    };

    if names.is_empty() {
        println!("No commands defined in '{}'.", args.file.display());
        return Ok(());
    }

    let out_dir = match &args.out {
        Some(dir) => ctx.path(dir),
        None => ctx.path(&ctx.config.output_dir),
    };

    let mut failures = Vec::new();
    let mut unresolved = Vec::new();

    for name in &names {
        let command = &file.commands[name];
        let unit = build_unit(&file, name, command, &ctx.config);

        let doc = match unit.compile() {
            Ok(doc) => doc,
            Err(e) => {
                eprintln!("{}", e);
                failures.push(name.clone());
                continue;
            }
        };

        for diagnostic in &doc.diagnostics {
            eprintln!("{}: {}", name, diagnostic);
        }
        if doc.unresolved_count() > 0 {
            unresolved.push(name.clone());
        }

        if args.stdout {
            print!("{}", doc.text);
        } else {
            let path = write_document(&out_dir, &ctx.config.output_extension, &doc)?;
            info!(command = %name, path = %path.display(), "wrote document");
            println!("Rendered {} -> {}", name, path.display());
        }

        ctx.log_event(
            &Event::new(EventAction::Compile)
                .with_command(name.as_str())
                .with_details(json!({
                    "rules": doc.rule_count,
                    "guidelines": doc.guideline_count,
                    "diagnostics": doc.diagnostics.len(),
                })),
        )?;
    }

    if !failures.is_empty() {
        return Err(EdictError::DefinitionError(format!(
            "{} of {} command(s) failed to compile: {}",
            failures.len(),
            names.len(),
            failures.join(", ")
        )));
    }

    if ctx.config.fail_on_unresolved && !unresolved.is_empty() {
        return Err(EdictError::LintFailure(format!(
            "unresolved store references in: {}",
            unresolved.join(", ")
        )));
    }

    Ok(())
}

/// Write a document to `<out_dir>/<file name>.<ext>` and return the path.
fn write_document(out_dir: &Path, extension: &str, doc: &CompiledDocument) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).map_err(|e| {
        EdictError::UserError(format!(
            "failed to create output directory '{}': {}",
            out_dir.display(),
            e
        ))
    })?;

    let path = out_dir.join(format!("{}.{}", document_file_stem(&doc.name), extension));
    fs::write(&path, &doc.text).map_err(|e| {
        EdictError::UserError(format!("failed to write '{}': {}", path.display(), e))
    })?;
    Ok(path)
}

/// File stem for a command name: anything outside `[A-Za-z0-9._-]` becomes `-`.
pub(crate) fn document_file_stem(command: &str) -> String {
    command
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

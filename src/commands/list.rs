//! Implementation of the `edict list` command.

use super::RunContext;
use crate::cli::ListArgs;
use edict::definition::DefinitionFile;
use edict::error::Result;
use edict::library::{BUILTIN_LIBRARIES, BUILTIN_PREFIX};

/// Execute the `edict list` command.
pub fn cmd_list(ctx: &RunContext, args: ListArgs) -> Result<()> {
    let file = DefinitionFile::load(ctx.path(&args.file))?;
    print!("{}", format_listing(&file));
    Ok(())
}

/// Commands, file libraries, then built-in libraries.
pub(crate) fn format_listing(file: &DefinitionFile) -> String {
    let mut out = String::from("Commands:\n");
    for (name, command) in &file.commands {
        out.push_str(&format!("  {} ({} step(s))\n", name, command.steps.len()));
    }

    out.push_str("\nLibraries:\n");
    for (name, steps) in &file.libraries {
        out.push_str(&format!("  {} ({} step(s))\n", name, steps.len()));
    }

    out.push_str("\nBuilt-in libraries:\n");
    for (name, _) in BUILTIN_LIBRARIES {
        out.push_str(&format!("  {}{}\n", BUILTIN_PREFIX, name));
    }
    out
}

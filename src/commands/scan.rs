//! Implementation of the `edict scan` command.

use super::RunContext;
use crate::cli::ScanArgs;
use edict::error::{EdictError, Result};
use edict::scan::scan_dir;

/// Execute the `edict scan` command.
pub fn cmd_scan(ctx: &RunContext, args: ScanArgs) -> Result<()> {
    let globs = if args.globs.is_empty() {
        ctx.config.scan_globs.clone()
    } else {
        args.globs
    };

    let report = scan_dir(&ctx.path(&args.dir), &globs)?;
    if report.passed() {
        println!(
            "{} document(s) scanned, no unresolved tokens",
            report.files_scanned
        );
        return Ok(());
    }

    eprint!("{}", report.format_error());
    Err(EdictError::LintFailure(format!(
        "{} unresolved token(s) in {} document(s)",
        report.hits.len(),
        report.files_scanned
    )))
}

//! Command implementations for edict.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod lint;
mod list;
mod log;
mod render;
mod scan;

#[cfg(test)]
mod tests;

use crate::cli::{Cli, Command};
use edict::config::Config;
use edict::error::{EdictError, Result};
use edict::events::{Event, append_event};
use std::path::{Path, PathBuf};

/// Settings shared by every command run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,
    /// Directory relative paths from config are resolved against.
    pub cwd: PathBuf,
}

impl RunContext {
    /// Resolve config for a run rooted at `cwd`.
    pub fn resolve(config_path: Option<&Path>, cwd: &Path) -> Result<Self> {
        let config = Config::resolve(config_path, cwd)?;
        Ok(Self {
            config,
            cwd: cwd.to_path_buf(),
        })
    }

    /// Resolve `path` against the run directory.
    pub fn path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Append an event if an audit log is configured.
    pub fn log_event(&self, event: &Event) -> Result<()> {
        match &self.config.events_log {
            Some(log) => append_event(&self.path(log), event),
            None => Ok(()),
        }
    }
}

/// Dispatch a command to its implementation, rooted at the current directory.
pub fn dispatch(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| {
        EdictError::UserError(format!("failed to determine current directory: {}", e))
    })?;
    dispatch_in(cli, &cwd)
}

/// Dispatch a command with an explicit working directory.
pub fn dispatch_in(cli: Cli, cwd: &Path) -> Result<()> {
    let config_path = cli.config.as_deref().map(|p| cwd.join(p));
    let ctx = RunContext::resolve(config_path.as_deref(), cwd)?;

    match cli.command {
        Command::Render(args) => render::cmd_render(&ctx, args),
        Command::Lint(args) => lint::cmd_lint(&ctx, args),
        Command::List(args) => list::cmd_list(&ctx, args),
        Command::Scan(args) => scan::cmd_scan(&ctx, args),
        Command::Log(args) => log::cmd_log(&ctx, args),
    }
}

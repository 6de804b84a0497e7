//! CLI argument parsing for edict.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Edict: compile directive definitions into agent command documents.
///
/// A definition file describes commands as ordered rule, guideline and
/// library-include steps. Each command compiles into one deterministic
/// text document.
#[derive(Parser, Debug)]
#[command(name = "edict")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: ./edict.yaml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for edict.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile commands and write their documents.
    ///
    /// Writes one file per command into the output directory, or prints
    /// the documents with --stdout.
    Render(RenderArgs),

    /// Compile commands and report diagnostics without writing documents.
    ///
    /// Reports key collisions, unknown or cyclic includes, and
    /// unresolved store references.
    Lint(LintArgs),

    /// List the commands and libraries a definition file provides.
    List(ListArgs),

    /// Scan rendered documents for unresolved store tokens.
    Scan(ScanArgs),

    /// Show the audit log configured by `events_log`.
    Log(LogArgs),
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Definition file (YAML).
    pub file: PathBuf,

    /// Only render this command.
    #[arg(short, long)]
    pub command: Option<String>,

    /// Output directory (overrides `output_dir` from config).
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Print documents to stdout instead of writing files.
    #[arg(long, conflicts_with = "out")]
    pub stdout: bool,
}

/// Arguments for the `lint` command.
#[derive(Parser, Debug)]
pub struct LintArgs {
    /// Definition files (YAML).
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Print diagnostics as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Definition file (YAML).
    pub file: PathBuf,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory holding rendered documents.
    pub dir: PathBuf,

    /// Glob patterns selecting documents (overrides `scan_globs` from config).
    #[arg(long, value_delimiter = ',')]
    pub globs: Vec<String>,
}

/// Arguments for the `log` command.
#[derive(Parser, Debug)]
pub struct LogArgs {
    /// Only show events for this command.
    #[arg(short, long)]
    pub command: Option<String>,

    /// Show at most this many of the most recent events.
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_render_defaults() {
        let cli = Cli::try_parse_from(["edict", "render", "defs.yaml"]).unwrap();
        assert!(cli.config.is_none());
        if let Command::Render(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("defs.yaml"));
            assert!(args.command.is_none());
            assert!(args.out.is_none());
            assert!(!args.stdout);
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_render_full() {
        let cli = Cli::try_parse_from([
            "edict",
            "render",
            "defs.yaml",
            "--command",
            "task:validate",
            "--out",
            "docs",
            "--config",
            "custom.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        if let Command::Render(args) = cli.command {
            assert_eq!(args.command.as_deref(), Some("task:validate"));
            assert_eq!(args.out, Some(PathBuf::from("docs")));
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_render_stdout_conflicts_with_out() {
        let result = Cli::try_parse_from([
            "edict", "render", "defs.yaml", "--stdout", "--out", "docs",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_lint_multiple_files() {
        let cli = Cli::try_parse_from(["edict", "lint", "a.yaml", "b.yaml", "--json"]).unwrap();
        if let Command::Lint(args) = cli.command {
            assert_eq!(args.files.len(), 2);
            assert!(args.json);
        } else {
            panic!("Expected Lint command");
        }
    }

    #[test]
    fn parse_lint_requires_file() {
        assert!(Cli::try_parse_from(["edict", "lint"]).is_err());
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["edict", "list", "defs.yaml"]).unwrap();
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn parse_log_filters() {
        let cli = Cli::try_parse_from(["edict", "log", "-c", "review", "-n", "5"]).unwrap();
        if let Command::Log(args) = cli.command {
            assert_eq!(args.command.as_deref(), Some("review"));
            assert_eq!(args.limit, Some(5));
        } else {
            panic!("Expected Log command");
        }
    }

    #[test]
    fn parse_scan_globs() {
        let cli = Cli::try_parse_from(["edict", "scan", "out", "--globs", "*.md,*.txt"]).unwrap();
        if let Command::Scan(args) = cli.command {
            assert_eq!(args.dir, PathBuf::from("out"));
            assert_eq!(args.globs, vec!["*.md", "*.txt"]);
        } else {
            panic!("Expected Scan command");
        }
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["edict", "list", "defs.yaml", "--config", "c.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
    }
}

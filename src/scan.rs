//! Scanning rendered documents for unresolved store tokens.
//!
//! Rendering never fails on a dangling reference; it leaves a
//! `{NAME?unresolved}` marker instead. This module finds those markers in
//! documents already on disk.

use crate::error::{EdictError, Result};
use crate::store::find_unresolved;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One unresolved token found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedHit {
    /// Path relative to the scan root (forward slashes).
    pub file_path: String,
    /// Line number (1-based).
    pub line_number: usize,
    /// Name inside the token.
    pub name: String,
}

/// Result of scanning a directory.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub files_scanned: usize,
    pub hits: Vec<UnresolvedHit>,
}

impl ScanReport {
    pub fn passed(&self) -> bool {
        self.hits.is_empty()
    }

    /// Format the hits as a user-facing message.
    ///
    /// ```text
    /// Unresolved store tokens found
    ///
    /// task-validate.md:12  {TASK?unresolved}
    /// ```
    pub fn format_error(&self) -> String {
        if self.passed() {
            return String::new();
        }

        let mut msg = String::from("Unresolved store tokens found\n\n");
        for hit in &self.hits {
            msg.push_str(&format!(
                "{}:{}  {}\n",
                hit.file_path,
                hit.line_number,
                crate::store::unresolved_token(&hit.name)
            ));
        }
        msg
    }
}

/// Scan every file under `root` matching one of `globs`.
///
/// Files are visited in sorted path order so reports are stable. Symlinks
/// are not followed.
pub fn scan_dir(root: &Path, globs: &[String]) -> Result<ScanReport> {
    let globset = build_globset(globs)
        .map_err(|e| EdictError::UserError(format!("invalid scan glob: {}", e)))?;

    let mut report = ScanReport::default();
    for path in collect_files(root)? {
        let relative = relative_path(root, &path);
        if !globset.is_match(&relative) {
            continue;
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            EdictError::UserError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        report.files_scanned += 1;
        report.hits.extend(scan_text(&relative, &content));
    }

    Ok(report)
}

/// Find unresolved tokens in one document.
pub fn scan_text(file_path: &str, content: &str) -> Vec<UnresolvedHit> {
    content
        .lines()
        .enumerate()
        .flat_map(|(i, line)| {
            find_unresolved(line).into_iter().map(move |name| UnresolvedHit {
                file_path: file_path.to_string(),
                line_number: i + 1,
                name,
            })
        })
        .collect()
}

fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            EdictError::UserError(format!("failed to read '{}': {}", root.display(), e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn build_globset(patterns: &[String]) -> std::result::Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();

    for pattern in patterns {
        let normalized = pattern.trim().replace('\\', "/");
        if normalized.is_empty() {
            continue;
        }
        builder.add(Glob::new(&normalized)?);
    }

    builder.build()
}

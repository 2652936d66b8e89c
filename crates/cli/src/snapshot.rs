// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stored CSS snapshots.
//!
//! One `.snap` file per case, holding the comment-stripped stylesheet.
//! Snapshots are versioned with the suite and only change on explicit update.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::error::{Error, Result};

/// Snapshot file extension.
const SNAPSHOT_EXT: &str = "snap";

/// How missing and mismatched snapshots are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotMode {
    /// Record missing snapshots, fail on mismatch.
    #[default]
    Check,
    /// Always overwrite with the current output.
    Update,
    /// Fail on missing snapshots as well as mismatches.
    Ci,
}

/// Result of comparing output against a stored snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotOutcome {
    /// Stored snapshot equals the output.
    Matched,
    /// No snapshot existed; the output was recorded.
    Recorded,
    /// The snapshot was rewritten (update mode).
    Updated,
    /// No snapshot exists and recording is not allowed.
    Missing { path: PathBuf },
    /// Output differs from the stored snapshot.
    Mismatch { path: PathBuf, diff: String },
}

impl SnapshotOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Missing { .. } | Self::Mismatch { .. })
    }
}

/// Snapshot directory for a suite.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    mode: SnapshotMode,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>, mode: SnapshotMode) -> Self {
        Self {
            dir: dir.into(),
            mode,
        }
    }

    pub fn mode(&self) -> SnapshotMode {
        self.mode
    }

    /// Path of the snapshot for a case id.
    pub fn path_for(&self, case_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", sanitize(case_id), SNAPSHOT_EXT))
    }

    /// Compare `actual` with the stored snapshot for `case_id`.
    pub fn assert(&self, case_id: &str, actual: &str) -> Result<SnapshotOutcome> {
        let path = self.path_for(case_id);
        let stored = read_snapshot(&path)?;

        match (self.mode, stored) {
            (SnapshotMode::Update, stored) => {
                if stored.as_deref() == Some(actual) {
                    return Ok(SnapshotOutcome::Matched);
                }
                write_snapshot(&path, actual)?;
                tracing::debug!("updated snapshot {}", path.display());
                Ok(SnapshotOutcome::Updated)
            }
            (SnapshotMode::Check, None) => {
                write_snapshot(&path, actual)?;
                tracing::debug!("recorded snapshot {}", path.display());
                Ok(SnapshotOutcome::Recorded)
            }
            (SnapshotMode::Ci, None) => Ok(SnapshotOutcome::Missing { path }),
            (_, Some(expected)) if expected == actual => Ok(SnapshotOutcome::Matched),
            (_, Some(expected)) => Ok(SnapshotOutcome::Mismatch {
                diff: unified_diff(&expected, actual),
                path,
            }),
        }
    }
}

/// Make a case id safe as a file name on every platform.
pub(crate) fn sanitize(case_id: &str) -> String {
    case_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// Read a snapshot, without its trailing newline. None when absent.
fn read_snapshot(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(
            content.strip_suffix('\n').unwrap_or(&content).to_string(),
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn write_snapshot(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, format!("{content}\n")).map_err(|e| Error::io(path, e))
}

/// Line diff between the stored snapshot and the new output.
///
/// Minified CSS is usually one long line, so rules are split onto their own
/// lines first to keep the diff readable.
fn unified_diff(expected: &str, actual: &str) -> String {
    let expected = split_rules(expected);
    let actual = split_rules(actual);
    TextDiff::from_lines(&expected, &actual)
        .unified_diff()
        .context_radius(3)
        .header("snapshot", "output")
        .to_string()
}

fn split_rules(css: &str) -> String {
    let mut out = css.replace('}', "}\n");
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Case and case result types for output formatting.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::artifacts::CssSize;
use crate::fixture::Fixture;

/// The engine flag value a case is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVariant {
    /// Key under `experimental` (e.g. `useLightningcss`).
    pub flag: String,
    pub value: bool,
}

/// One build of one fixture.
#[derive(Debug, Clone)]
pub struct Case {
    pub fixture: Arc<Fixture>,
    /// None for fixtures whose config is not rewritten.
    pub engine: Option<EngineVariant>,
}

impl Case {
    /// Stable identifier, also used as the snapshot name.
    ///
    /// `<fixture>@<flag>=<value>`, or just `<fixture>` without an engine variant.
    pub fn id(&self) -> String {
        match &self.engine {
            Some(engine) => format!("{}@{}={}", self.fixture.name(), engine.flag, engine.value),
            None => self.fixture.name().to_string(),
        }
    }
}

/// Final state of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Passed,
    Failed,
    Skipped,
}

/// Category of the assertion that terminated a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Build could not be spawned or exited non-zero.
    BuildFailed,
    /// Build exited 0 without printing the success marker.
    MissingMarker,
    /// Build exceeded the configured timeout.
    Timeout,
    /// Wrong number of emitted stylesheets.
    CssCount,
    /// Wrong number of emitted media files.
    MediaCount,
    /// Media file names differ once hashes are removed.
    MediaNames,
    /// An emitted media file has no content hash.
    MissingHash,
    /// Stylesheet lacks an expected substring.
    Contains,
    /// Stylesheet does not match an expected regex.
    Matches,
    /// Stylesheet differs from its stored snapshot.
    SnapshotMismatch,
    /// No stored snapshot and recording is disabled.
    SnapshotMissing,
    /// Filesystem error during setup or inspection.
    Io,
    /// The case aborted inside cssprobe itself.
    Internal,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BuildFailed => "build_failed",
            Self::MissingMarker => "missing_marker",
            Self::Timeout => "timeout",
            Self::CssCount => "css_count",
            Self::MediaCount => "media_count",
            Self::MediaNames => "media_names",
            Self::MissingHash => "missing_hash",
            Self::Contains => "contains",
            Self::Matches => "matches",
            Self::SnapshotMismatch => "snapshot_mismatch",
            Self::SnapshotMissing => "snapshot_missing",
            Self::Io => "io",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The assertion that failed, with enough context to diagnose it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Build stdout, for build failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    /// Build stderr, for build failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
}

impl CaseFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stdout: None,
            stderr: None,
        }
    }

    /// Attach captured build output.
    pub fn with_output(mut self, stdout: &str, stderr: &str) -> Self {
        self.stdout = Some(stdout.to_string());
        if !stderr.is_empty() {
            self.stderr = Some(stderr.to_string());
        }
        self
    }
}

/// The stylesheet a case inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssReport {
    pub file: String,
    #[serde(flatten)]
    pub size: CssSize,
}

/// Outcome of one case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub id: String,
    pub fixture: String,
    pub engine: Option<bool>,
    pub status: CaseStatus,
    pub failure: Option<CaseFailure>,
    /// Why the case did not run.
    pub skip_reason: Option<String>,
    /// Build wall time (None when the build never ran).
    pub build_time: Option<Duration>,
    pub css: Option<CssReport>,
    /// Snapshot files written during the case.
    pub recorded_snapshots: Vec<String>,
}

impl CaseResult {
    fn new(case: &Case, status: CaseStatus) -> Self {
        Self {
            id: case.id(),
            fixture: case.fixture.name().to_string(),
            engine: case.engine.as_ref().map(|e| e.value),
            status,
            failure: None,
            skip_reason: None,
            build_time: None,
            css: None,
            recorded_snapshots: Vec::new(),
        }
    }

    pub fn passed(case: &Case) -> Self {
        Self::new(case, CaseStatus::Passed)
    }

    pub fn skipped(case: &Case, reason: impl Into<String>) -> Self {
        Self {
            skip_reason: Some(reason.into()),
            ..Self::new(case, CaseStatus::Skipped)
        }
    }

    /// Mark this result failed with the terminating assertion.
    pub fn fail(&mut self, failure: CaseFailure) {
        self.status = CaseStatus::Failed;
        self.failure = Some(failure);
    }

    pub fn is_failed(&self) -> bool {
        self.status == CaseStatus::Failed
    }
}

#[cfg(test)]
#[path = "case_tests.rs"]
mod tests;

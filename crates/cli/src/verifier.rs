// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The build verifier.
//!
//! Each case runs strictly in order:
//! 1. Setup: rewrite the framework config (engine variants only), remove old output
//! 2. Build: run the external build and capture its output
//! 3. Success: exit code 0 and the success marker in stdout
//! 4. Artifacts: stylesheet count and content, then media count and names
//!
//! The first failed assertion ends the case.

use std::path::Path;

use regex::Regex;

use crate::artifacts::{self, CssSize};
use crate::build::{self, BuildResult};
use crate::case::{Case, CaseFailure, CaseResult, CssReport, FailureKind};
use crate::config::BuildConfig;
use crate::error::Error;
use crate::fixture::Fixture;
use crate::snapshot::{SnapshotOutcome, SnapshotStore};

/// Runs cases against the external build.
pub struct Verifier<'a> {
    build: &'a BuildConfig,
    snapshots: &'a SnapshotStore,
}

impl<'a> Verifier<'a> {
    pub fn new(build: &'a BuildConfig, snapshots: &'a SnapshotStore) -> Self {
        Self { build, snapshots }
    }

    /// Run one case to completion.
    pub fn verify(&self, case: &Case) -> CaseResult {
        let mut result = CaseResult::passed(case);
        tracing::debug!("case {} starting", result.id);

        if let Err(failure) = self.run(case, &mut result) {
            tracing::debug!("case {} failed: {}", result.id, failure.kind);
            result.fail(failure);
        }

        result
    }

    fn run(&self, case: &Case, result: &mut CaseResult) -> Result<(), CaseFailure> {
        let fixture = &case.fixture;

        setup(case).map_err(io_failure)?;

        let build = self.execute(fixture)?;
        result.build_time = Some(build.duration);
        self.assert_success(&build)?;

        self.assert_css(case, result)?;
        assert_media(fixture)?;

        Ok(())
    }

    fn execute(&self, fixture: &Fixture) -> Result<BuildResult, CaseFailure> {
        let build = build::run_build(self.build, &fixture.dir).map_err(|e| {
            CaseFailure::new(
                FailureKind::BuildFailed,
                format!(
                    "could not run `{}`: {}",
                    self.build.command.join(" "),
                    e
                ),
            )
        })?;

        if build.timed_out {
            let limit = self.build.timeout.unwrap_or(build.duration);
            return Err(CaseFailure::new(
                FailureKind::Timeout,
                format!("build timed out after {limit:?}"),
            )
            .with_output(&build.stdout, &build.stderr));
        }

        Ok(build)
    }

    fn assert_success(&self, build: &BuildResult) -> Result<(), CaseFailure> {
        if build.exit_code != Some(0) {
            let code = build
                .exit_code
                .map_or_else(|| "a signal".to_string(), |c| format!("code {c}"));
            return Err(
                CaseFailure::new(FailureKind::BuildFailed, format!("build exited with {code}"))
                    .with_output(&build.stdout, &build.stderr),
            );
        }

        if !build.succeeded(&self.build.success_marker) {
            return Err(CaseFailure::new(
                FailureKind::MissingMarker,
                format!(
                    "build output does not contain `{}`",
                    self.build.success_marker
                ),
            )
            .with_output(&build.stdout, &build.stderr));
        }

        Ok(())
    }

    fn assert_css(&self, case: &Case, result: &mut CaseResult) -> Result<(), CaseFailure> {
        let fixture = &case.fixture;
        let expected = fixture.config.css_files;

        let names = artifacts::list_dir(&fixture.css_dir)
            .map_err(|e| io_failure(Error::io(&fixture.css_dir, e)))?;
        let css_files = artifacts::filter_by_extension(&names, "css");

        if css_files.len() != expected {
            return Err(CaseFailure::new(
                FailureKind::CssCount,
                format!(
                    "expected {} CSS file{}, found {}{}",
                    expected,
                    if expected == 1 { "" } else { "s" },
                    css_files.len(),
                    list_suffix(&css_files)
                ),
            ));
        }

        // Content assertions apply to the first stylesheet in name order
        let Some(file) = css_files.first() else {
            return Ok(());
        };
        let path = fixture.css_dir.join(file);
        let bytes = std::fs::read(&path).map_err(|e| io_failure(Error::io(&path, e)))?;
        let size = measure(&path, &bytes)?;
        result.css = Some(CssReport {
            file: file.clone(),
            size,
        });

        let raw = String::from_utf8_lossy(&bytes);
        assert_contains(&raw, &fixture.config.contains)?;

        let stripped = artifacts::strip_comments(&raw);
        assert_matches(&stripped, &fixture.config.matches)?;

        if fixture.config.snapshot {
            self.assert_snapshot(case, &stripped, result)?;
        }

        Ok(())
    }

    fn assert_snapshot(
        &self,
        case: &Case,
        css: &str,
        result: &mut CaseResult,
    ) -> Result<(), CaseFailure> {
        let id = case.id();
        let outcome = self.snapshots.assert(&id, css).map_err(io_failure)?;

        match outcome {
            SnapshotOutcome::Matched => Ok(()),
            SnapshotOutcome::Recorded | SnapshotOutcome::Updated => {
                result
                    .recorded_snapshots
                    .push(self.snapshots.path_for(&id).display().to_string());
                Ok(())
            }
            SnapshotOutcome::Missing { path } => Err(CaseFailure::new(
                FailureKind::SnapshotMissing,
                format!(
                    "no snapshot at {} (run without --ci to record it)",
                    path.display()
                ),
            )),
            SnapshotOutcome::Mismatch { path, diff } => Err(CaseFailure::new(
                FailureKind::SnapshotMismatch,
                format!(
                    "output differs from {} (run with --update-snapshots to accept)\n{}",
                    path.display(),
                    diff.trim_end()
                ),
            )),
        }
    }
}

/// Rewrite the framework config for engine variants, then clear old output.
fn setup(case: &Case) -> crate::error::Result<()> {
    let fixture = &case.fixture;
    if let (Some(engine), Some(base)) = (&case.engine, &fixture.config.base_config) {
        fixture.write_engine_variant(base, &engine.flag, engine.value)?;
    }
    fixture.clean_output()
}

fn assert_contains(css: &str, needles: &[String]) -> Result<(), CaseFailure> {
    match needles.iter().find(|needle| !css.contains(needle.as_str())) {
        Some(missing) => Err(CaseFailure::new(
            FailureKind::Contains,
            format!("CSS does not contain `{missing}`"),
        )),
        None => Ok(()),
    }
}

fn assert_matches(css: &str, patterns: &[String]) -> Result<(), CaseFailure> {
    for pattern in patterns {
        // Patterns are validated when the config loads
        let re = Regex::new(pattern).map_err(|e| {
            CaseFailure::new(FailureKind::Matches, format!("invalid regex `{pattern}`: {e}"))
        })?;
        if !re.is_match(css) {
            return Err(CaseFailure::new(
                FailureKind::Matches,
                format!("CSS does not match /{pattern}/\n  actual: {css}"),
            ));
        }
    }
    Ok(())
}

/// Check media count and hash-free names when the fixture expects media.
fn assert_media(fixture: &Fixture) -> Result<(), CaseFailure> {
    let expected_count = fixture.config.media_files;
    let expected_names = fixture.config.media_names.as_ref();
    if expected_count.is_none() && expected_names.is_none() {
        return Ok(());
    }

    let files = artifacts::list_dir(&fixture.media_dir)
        .map_err(|e| io_failure(Error::io(&fixture.media_dir, e)))?;

    if let Some(expected) = expected_count
        && files.len() != expected
    {
        return Err(CaseFailure::new(
            FailureKind::MediaCount,
            format!(
                "expected {} media file{}, found {}{}",
                expected,
                if expected == 1 { "" } else { "s" },
                files.len(),
                list_suffix(&files)
            ),
        ));
    }

    if let Some(expected) = expected_names {
        let actual = artifacts::logical_names(&files).map_err(|name| {
            CaseFailure::new(
                FailureKind::MissingHash,
                format!("media file `{name}` has no content hash segment"),
            )
        })?;
        let mut expected = expected.clone();
        expected.sort();
        if actual != expected {
            return Err(CaseFailure::new(
                FailureKind::MediaNames,
                format!(
                    "expected media [{}], found [{}]",
                    expected.join(", "),
                    actual.join(", ")
                ),
            ));
        }
    }

    Ok(())
}

fn measure(path: &Path, bytes: &[u8]) -> Result<CssSize, CaseFailure> {
    artifacts::measure_css(bytes).map_err(|e| io_failure(Error::io(path, e)))
}

fn io_failure(err: Error) -> CaseFailure {
    CaseFailure::new(FailureKind::Io, err.to_string())
}

/// `": a, b"` for non-empty lists, empty otherwise.
fn list_suffix(names: &[String]) -> String {
    if names.is_empty() {
        String::new()
    } else {
        format!(": {}", names.join(", "))
    }
}

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod tests;

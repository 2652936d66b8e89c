// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use super::RunOutput;
use crate::case::{CaseFailure, CaseResult, CaseStatus, CssReport};

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

#[derive(Debug, Serialize)]
struct OutputJson<'a> {
    timestamp: &'a str,
    passed: bool,
    cases: Vec<CaseJson<'a>>,
}

#[derive(Debug, Serialize)]
struct CaseJson<'a> {
    id: &'a str,
    fixture: &'a str,
    /// Engine flag value, null for fixtures without variants.
    engine: Option<bool>,
    status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    css: Option<&'a CssReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<&'a CaseFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_reason: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    recorded_snapshots: &'a [String],
}

impl<'a> From<&'a CaseResult> for CaseJson<'a> {
    fn from(result: &'a CaseResult) -> Self {
        Self {
            id: &result.id,
            fixture: &result.fixture,
            engine: result.engine,
            status: result.status,
            duration_ms: result.build_time.map(|d| d.as_millis() as u64),
            css: result.css.as_ref(),
            failure: result.failure.as_ref(),
            skip_reason: result.skip_reason.as_deref(),
            recorded_snapshots: &result.recorded_snapshots,
        }
    }
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, output: &RunOutput) -> std::io::Result<()> {
        let json = OutputJson {
            timestamp: &output.timestamp,
            passed: output.passed,
            cases: output.cases.iter().map(Into::into).collect(),
        };
        let json = serde_json::to_string_pretty(&json).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Create RunOutput with current timestamp.
pub fn create_output(cases: Vec<CaseResult>) -> RunOutput {
    RunOutput::new(
        Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        cases,
    )
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for suite results.

pub mod json;
pub mod text;

use crate::case::{CaseResult, CaseStatus};

/// Results of one suite run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// RFC 3339 time the run finished.
    pub timestamp: String,
    /// True when no case failed.
    pub passed: bool,
    pub cases: Vec<CaseResult>,
}

impl RunOutput {
    pub fn new(timestamp: String, cases: Vec<CaseResult>) -> Self {
        let passed = !cases.iter().any(CaseResult::is_failed);
        Self {
            timestamp,
            passed,
            cases,
        }
    }

    /// Case counts by status.
    pub fn summary(&self) -> Summary {
        let count = |status| self.cases.iter().filter(|c| c.status == status).count();
        Summary {
            passed: count(CaseStatus::Passed),
            failed: count(CaseStatus::Failed),
            skipped: count(CaseStatus::Skipped),
        }
    }
}

/// Case counts for the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

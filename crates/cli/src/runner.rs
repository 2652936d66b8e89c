// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel suite runner with panic isolation.
//!
//! Fixtures run in parallel using rayon. Cases of one fixture share its
//! directory, so they run sequentially on the same worker. Results come back
//! in plan order regardless of completion order.

use std::num::NonZeroUsize;
use std::sync::Arc;

use rayon::prelude::*;

use crate::case::{Case, CaseFailure, CaseResult, FailureKind};
use crate::error::{Error, Result};
use crate::suite::PlannedCase;
use crate::verifier::Verifier;

/// Runs a single case to completion.
pub trait CaseExecutor: Sync {
    fn run_case(&self, case: &Case) -> CaseResult;
}

impl CaseExecutor for Verifier<'_> {
    fn run_case(&self, case: &Case) -> CaseResult {
        self.verify(case)
    }
}

/// Configuration for the suite runner.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Worker threads (None = rayon's default, one per CPU).
    pub jobs: Option<NonZeroUsize>,
}

/// The suite runner executes planned cases, one fixture per worker.
pub struct SuiteRunner {
    config: RunnerConfig,
}

impl SuiteRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run every planned case and return results in plan order.
    pub fn run<E: CaseExecutor>(
        &self,
        executor: &E,
        planned: Vec<PlannedCase>,
    ) -> Result<Vec<CaseResult>> {
        let groups = group_by_fixture(planned);

        match self.config.jobs {
            Some(jobs) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs.get())
                    .build()
                    .map_err(|e| Error::Internal(format!("could not start worker pool: {e}")))?;
                Ok(pool.install(|| run_groups(executor, groups)))
            }
            None => Ok(run_groups(executor, groups)),
        }
    }
}

fn run_groups<E: CaseExecutor>(executor: &E, groups: Vec<Vec<PlannedCase>>) -> Vec<CaseResult> {
    let per_fixture: Vec<Vec<CaseResult>> = groups
        .into_par_iter()
        .map(|group| group.iter().map(|p| run_one(executor, p)).collect())
        .collect();

    per_fixture.into_iter().flatten().collect()
}

fn run_one<E: CaseExecutor>(executor: &E, planned: &PlannedCase) -> CaseResult {
    if let Some(reason) = &planned.skip {
        tracing::debug!("case {} skipped: {}", planned.case.id(), reason);
        return CaseResult::skipped(&planned.case, reason.clone());
    }

    // A panic fails its own case; the rest of the suite keeps running
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        executor.run_case(&planned.case)
    })) {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("case {} panicked", planned.case.id());
            let mut result = CaseResult::passed(&planned.case);
            result.fail(CaseFailure::new(FailureKind::Internal, "case panicked"));
            result
        }
    }
}

/// Split plan into consecutive runs of cases sharing a fixture.
fn group_by_fixture(planned: Vec<PlannedCase>) -> Vec<Vec<PlannedCase>> {
    let mut groups: Vec<Vec<PlannedCase>> = Vec::new();
    for case in planned {
        match groups.last_mut() {
            Some(group)
                if group
                    .last()
                    .is_some_and(|last| Arc::ptr_eq(&last.case.fixture, &case.case.fixture)) =>
            {
                group.push(case);
            }
            _ => groups.push(vec![case]),
        }
    }
    groups
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;

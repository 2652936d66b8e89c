// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite loading and case expansion.
//!
//! A suite is a loaded `cssprobe.toml` plus the directory it lives in. Every
//! fixture expands into one case per engine value, or a single case when the
//! fixture does not toggle the engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::case::{Case, EngineVariant};
use crate::config::{self, Config, FixtureConfig};
use crate::error::{Error, Result};
use crate::fixture::Fixture;

/// A loaded suite rooted at its config file's directory.
#[derive(Debug, Clone)]
pub struct Suite {
    pub config: Config,
    /// Directory fixture and snapshot paths are resolved against.
    pub root: PathBuf,
}

/// Which engine values to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineSelect {
    #[default]
    Both,
    On,
    Off,
}

impl EngineSelect {
    fn allows(self, value: bool) -> bool {
        match self {
            Self::Both => true,
            Self::On => value,
            Self::Off => !value,
        }
    }
}

/// Restricts which cases a suite expands to.
#[derive(Debug, Clone, Default)]
pub struct CaseFilter {
    patterns: Vec<String>,
    matcher: Option<GlobSet>,
    engine: EngineSelect,
}

impl CaseFilter {
    /// Build a filter from fixture name globs. No patterns selects everything.
    pub fn new(patterns: &[String], engine: EngineSelect) -> Result<Self> {
        let matcher = if patterns.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in patterns {
                let glob = Glob::new(pattern).map_err(|e| {
                    Error::Argument(format!("invalid fixture pattern `{pattern}`: {e}"))
                })?;
                builder.add(glob);
            }
            Some(
                builder
                    .build()
                    .map_err(|e| Error::Argument(format!("invalid fixture pattern: {e}")))?,
            )
        };

        Ok(Self {
            patterns: patterns.to_vec(),
            matcher,
            engine,
        })
    }

    fn selects(&self, name: &str) -> bool {
        self.matcher.as_ref().is_none_or(|m| m.is_match(name))
    }
}

/// A case ready to run, or the reason it will not run.
#[derive(Debug, Clone)]
pub struct PlannedCase {
    pub case: Case,
    pub skip: Option<String>,
}

impl Suite {
    /// Load the suite at `config_path`, warning on unknown keys.
    pub fn load(config_path: &Path) -> Result<Self> {
        tracing::debug!("loading suite from {}", config_path.display());
        let config = config::load_with_warnings(config_path)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self { config, root })
    }

    /// Directory holding snapshot files.
    pub fn snapshot_dir(&self) -> PathBuf {
        self.root.join(&self.config.snapshots.dir)
    }

    /// Expand fixtures into cases, in configuration order.
    pub fn cases(&self, filter: &CaseFilter) -> Result<Vec<PlannedCase>> {
        self.cases_with_env(filter, |name| std::env::var(name).ok())
    }

    /// Like [`Suite::cases`], reading environment variables through `env`.
    pub fn cases_with_env(
        &self,
        filter: &CaseFilter,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Vec<PlannedCase>> {
        let selected: Vec<&FixtureConfig> = self
            .config
            .fixtures
            .iter()
            .filter(|f| filter.selects(&f.name))
            .collect();

        if selected.is_empty() && !filter.patterns.is_empty() {
            return Err(Error::Argument(format!(
                "no fixture matches {}",
                filter
                    .patterns
                    .iter()
                    .map(|p| format!("`{p}`"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }

        let mut planned = Vec::new();
        for fixture_config in selected {
            let fixture = Arc::new(Fixture::resolve(
                &self.root,
                fixture_config,
                &self.config.build,
            ));
            let skip = skip_reason(fixture_config, &env);

            for engine in self.engine_variants(fixture_config, filter.engine) {
                planned.push(PlannedCase {
                    case: Case {
                        fixture: Arc::clone(&fixture),
                        engine,
                    },
                    skip: skip.clone(),
                });
            }
        }

        tracing::debug!("planned {} cases", planned.len());
        Ok(planned)
    }

    fn engine_variants(
        &self,
        fixture: &FixtureConfig,
        select: EngineSelect,
    ) -> Vec<Option<EngineVariant>> {
        if !fixture.toggles_engine() {
            return vec![None];
        }
        let engine = &self.config.engine;
        engine
            .values
            .iter()
            .copied()
            .filter(|&value| select.allows(value))
            .map(|value| {
                Some(EngineVariant {
                    flag: engine.flag.clone(),
                    value,
                })
            })
            .collect()
    }
}

/// First `skip_if_env` variable that is set and non-empty.
fn skip_reason(
    fixture: &FixtureConfig,
    env: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    fixture
        .skip_if_env
        .iter()
        .find(|name| env(name).is_some_and(|v| !v.is_empty()))
        .map(|name| format!("{name} is set"))
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite configuration parsing and validation.
//!
//! Handles cssprobe.toml parsing with version validation and unknown key warnings.

pub mod duration;
mod keys;

use std::collections::{HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::snapshot::sanitize;

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full suite configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// How to invoke the external build and where it writes.
    #[serde(default)]
    pub build: BuildConfig,

    /// The boolean CSS engine toggle each fixture is run under.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Snapshot storage.
    #[serde(default)]
    pub snapshots: SnapshotsConfig,

    /// Fixture projects, in run order.
    #[serde(default, rename = "fixture")]
    pub fixtures: Vec<FixtureConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            build: BuildConfig::default(),
            engine: EngineConfig::default(),
            snapshots: SnapshotsConfig::default(),
            fixtures: Vec::new(),
        }
    }
}

/// External build tool configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Program and arguments; the fixture directory is appended.
    #[serde(default = "BuildConfig::default_command")]
    pub command: Vec<String>,

    /// Substring that must appear in the build's stdout.
    #[serde(default = "BuildConfig::default_success_marker")]
    pub success_marker: String,

    /// Kill the build after this long (None = wait forever).
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub timeout: Option<Duration>,

    /// Build output directory, relative to the fixture.
    #[serde(default = "BuildConfig::default_output_dir")]
    pub output_dir: PathBuf,

    /// CSS directory, relative to the output directory.
    #[serde(default = "BuildConfig::default_css_dir")]
    pub css_dir: PathBuf,

    /// Media directory, relative to the output directory.
    #[serde(default = "BuildConfig::default_media_dir")]
    pub media_dir: PathBuf,

    /// Framework config file rewritten for each engine variant.
    #[serde(default = "BuildConfig::default_config_file")]
    pub config_file: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            command: Self::default_command(),
            success_marker: Self::default_success_marker(),
            timeout: None,
            output_dir: Self::default_output_dir(),
            css_dir: Self::default_css_dir(),
            media_dir: Self::default_media_dir(),
            config_file: Self::default_config_file(),
        }
    }
}

impl BuildConfig {
    pub(crate) fn default_command() -> Vec<String> {
        vec!["npx".to_string(), "next".to_string(), "build".to_string()]
    }

    pub(crate) fn default_success_marker() -> String {
        "Compiled successfully".to_string()
    }

    pub(crate) fn default_output_dir() -> PathBuf {
        PathBuf::from(".next")
    }

    pub(crate) fn default_css_dir() -> PathBuf {
        PathBuf::from("static/css")
    }

    pub(crate) fn default_media_dir() -> PathBuf {
        PathBuf::from("static/media")
    }

    pub(crate) fn default_config_file() -> String {
        "next.config.js".to_string()
    }
}

/// Engine toggle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Key written under `experimental` in the framework config.
    #[serde(default = "EngineConfig::default_flag")]
    pub flag: String,

    /// Values each toggled fixture is built with, in order.
    #[serde(default = "EngineConfig::default_values")]
    pub values: Vec<bool>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            flag: Self::default_flag(),
            values: Self::default_values(),
        }
    }
}

impl EngineConfig {
    pub(crate) fn default_flag() -> String {
        "useLightningcss".to_string()
    }

    pub(crate) fn default_values() -> Vec<bool> {
        vec![true, false]
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotsConfig {
    /// Directory holding `.snap` files, relative to the config file.
    #[serde(default = "SnapshotsConfig::default_dir")]
    pub dir: PathBuf,
}

impl Default for SnapshotsConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

impl SnapshotsConfig {
    pub(crate) fn default_dir() -> PathBuf {
        PathBuf::from("__snapshots__")
    }
}

/// A single fixture project and what its build must produce.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureConfig {
    /// Unique name, used in case ids and snapshot file names.
    pub name: String,

    /// Fixture directory, relative to the config file.
    pub path: PathBuf,

    /// Module the rewritten framework config spreads, as written in `require()`.
    /// Without it the fixture's config is left alone and no engine variants run.
    #[serde(default)]
    pub base_config: Option<String>,

    /// Expected number of `.css` files.
    #[serde(default = "FixtureConfig::default_css_files")]
    pub css_files: usize,

    /// Literal substrings the CSS file must contain.
    #[serde(default)]
    pub contains: Vec<String>,

    /// Regexes the comment-stripped CSS must match.
    #[serde(default)]
    pub matches: Vec<String>,

    /// Compare the comment-stripped CSS against a stored snapshot.
    #[serde(default)]
    pub snapshot: bool,

    /// Expected number of media files.
    #[serde(default)]
    pub media_files: Option<usize>,

    /// Expected media file names with their hash segment removed.
    #[serde(default)]
    pub media_names: Option<Vec<String>>,

    /// Skip this fixture when any of these environment variables is set.
    #[serde(default)]
    pub skip_if_env: Vec<String>,
}

impl FixtureConfig {
    pub(crate) fn default_css_files() -> usize {
        1
    }

    /// Whether this fixture is built once per engine value.
    pub fn toggles_engine(&self) -> bool {
        self.base_config.is_some()
    }
}

/// Load config from file (strict mode, no warnings).
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_with_warnings(&content, path)
}

/// Parse config from string content.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    check_version(content, path)?;

    let config: Config = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    validate(&config, path)?;
    Ok(config)
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let config = parse(content, path)?;

    // The content already parsed as a table above
    if let Ok(table) = content.parse::<toml::Table>() {
        for key in keys::unknown_keys(&table) {
            keys::warn_unknown_key(path, &key);
        }
    }

    Ok(config)
}

fn check_version(content: &str, path: &Path) -> Result<()> {
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade cssprobe to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    Ok(())
}

/// Reject configs the runner cannot execute.
fn validate(config: &Config, path: &Path) -> Result<()> {
    let fail = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    if config.build.command.first().is_none_or(|p| p.is_empty()) {
        return Err(fail("build.command must name a program".to_string()));
    }

    if config.engine.flag.is_empty() {
        return Err(fail("engine.flag must not be empty".to_string()));
    }

    if config.engine.values.is_empty() {
        return Err(fail("engine.values must list at least one value".to_string()));
    }

    let mut seen = HashSet::new();
    // Fixtures sharing a directory would race on its config file and output
    let mut dirs: HashMap<PathBuf, &str> = HashMap::new();
    let mut snapshot_stems: HashMap<(String, bool), &str> = HashMap::new();
    for fixture in &config.fixtures {
        if fixture.name.trim().is_empty() {
            return Err(fail(format!(
                "fixture at {} has an empty name",
                fixture.path.display()
            )));
        }
        if !seen.insert(fixture.name.as_str()) {
            return Err(fail(format!("duplicate fixture name `{}`", fixture.name)));
        }
        if let Some(other) = dirs.insert(normalize(&fixture.path), &fixture.name) {
            return Err(fail(format!(
                "fixtures `{}` and `{}` share the directory {}",
                other,
                fixture.name,
                fixture.path.display()
            )));
        }
        if fixture.snapshot {
            let stem = (sanitize(&fixture.name), fixture.toggles_engine());
            if let Some(other) = snapshot_stems.insert(stem, &fixture.name) {
                return Err(fail(format!(
                    "fixtures `{}` and `{}` would share snapshot files; rename one",
                    other, fixture.name
                )));
            }
        }
        for pattern in &fixture.matches {
            Regex::new(pattern).map_err(|e| {
                fail(format!(
                    "fixture `{}`: invalid regex `{}`: {}",
                    fixture.name, pattern, e
                ))
            })?;
        }
    }

    Ok(())
}

/// Drop `.` components so `./a` and `a/` compare equal to `a`.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture project setup: framework config rewriting and output cleanup.

use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, FixtureConfig};
use crate::error::{Error, Result};

/// A fixture with every path resolved against the suite root.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Fixture configuration as written in cssprobe.toml.
    pub config: FixtureConfig,
    /// Fixture project directory.
    pub dir: PathBuf,
    /// Framework config file rewritten per engine variant.
    pub config_file: PathBuf,
    /// Build output directory, removed before every build.
    pub output_dir: PathBuf,
    /// Directory holding emitted stylesheets.
    pub css_dir: PathBuf,
    /// Directory holding emitted media assets.
    pub media_dir: PathBuf,
}

impl Fixture {
    /// Resolve a fixture against the suite root and build layout.
    pub fn resolve(root: &Path, config: &FixtureConfig, build: &BuildConfig) -> Self {
        let dir = root.join(&config.path);
        let output_dir = dir.join(&build.output_dir);
        Self {
            config: config.clone(),
            config_file: dir.join(&build.config_file),
            css_dir: output_dir.join(&build.css_dir),
            media_dir: output_dir.join(&build.media_dir),
            output_dir,
            dir,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Overwrite the framework config with an engine variant.
    ///
    /// The file is left in place after the run.
    pub fn write_engine_variant(&self, base_config: &str, flag: &str, value: bool) -> Result<()> {
        let content = render_engine_variant(base_config, flag, value);
        tracing::debug!(
            "writing {} with {}={}",
            self.config_file.display(),
            flag,
            value
        );
        std::fs::write(&self.config_file, content).map_err(|e| Error::io(&self.config_file, e))
    }

    /// Remove any previous build output. A missing directory is not an error.
    pub fn clean_output(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.output_dir) {
            Ok(()) => {
                tracing::debug!("removed {}", self.output_dir.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.output_dir, e)),
        }
    }
}

/// Render a framework config that spreads `base_config` and sets one
/// experimental flag.
pub fn render_engine_variant(base_config: &str, flag: &str, value: bool) -> String {
    format!(
        "
const config = require('{base_config}');
module.exports = {{
  ...config,
  experimental: {{
    {flag}: {value}
  }}
}}"
    )
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suite config discovery.
//!
//! Walks from the current directory up to the git root looking for cssprobe.toml.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Suite config file name.
pub const CONFIG_FILE_NAME: &str = "cssprobe.toml";

/// Find cssprobe.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .scan(false, |hit_git_root, dir| {
            if *hit_git_root {
                return None;
            }
            *hit_git_root = dir.join(".git").exists();
            Some(dir)
        })
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Resolve the suite config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "CSSPROBE_CONFIG")
/// 2. Discovery from current directory up to git root
///
/// A suite without a config has no fixtures, so a missing file is an error.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match explicit {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => find_config(cwd).ok_or_else(|| Error::Config {
            message: format!(
                "no {} found in {} or its parents\n  Run `cssprobe init` to create one.",
                CONFIG_FILE_NAME,
                cwd.display()
            ),
            path: None,
        }),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;

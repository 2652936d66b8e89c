// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Implementation of the `cssprobe init` command.

use anyhow::Result;

use crate::cli::InitArgs;
use crate::config::BuildConfig;
use crate::discovery::CONFIG_FILE_NAME;
use crate::error::{Error, ExitCode};
use crate::init::{detect_fixtures, render_template};

/// Run the `init` command to create a cssprobe.toml in the fixture directory.
pub fn run(args: &InitArgs) -> Result<ExitCode> {
    let dir = &args.dir;
    if !dir.is_dir() {
        return Err(Error::Argument(format!("not a directory: {}", dir.display())).into());
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        eprintln!(
            "{} already exists. Edit it or remove it first.",
            config_path.display()
        );
        return Ok(ExitCode::ConfigError);
    }

    let config_file = BuildConfig::default_config_file();
    let fixtures = detect_fixtures(dir, &config_file).map_err(|e| Error::io(dir, e))?;
    let shared = dir.join(&config_file).is_file().then_some(config_file.as_str());
    tracing::debug!(
        "detected {} fixtures in {} (shared config: {})",
        fixtures.len(),
        dir.display(),
        shared.is_some()
    );

    let content = render_template(&fixtures, shared);
    std::fs::write(&config_path, content).map_err(|e| Error::io(&config_path, e))?;

    match fixtures.len() {
        0 => println!("Created {} (no fixtures found)", config_path.display()),
        1 => println!("Created {} with 1 fixture", config_path.display()),
        n => println!("Created {} with {} fixtures", config_path.display(), n),
    }
    Ok(ExitCode::Success)
}

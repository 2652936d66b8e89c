// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::snapshot::SnapshotMode;
use crate::suite::EngineSelect;

/// Verifies that fixture projects build to the expected CSS and media output
#[derive(Parser)]
#[command(name = "cssprobe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "CSSPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build fixtures and verify their output
    Run(RunArgs),
    /// List the cases a run would execute
    List(ListArgs),
    /// Create a cssprobe.toml for the fixtures in a directory
    Init(InitArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Fixture name globs (default: all fixtures)
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Engine values to run
    #[arg(long, value_enum, default_value = "both")]
    pub engine: EngineArg,

    /// Overwrite snapshots that differ
    #[arg(long, conflicts_with = "ci")]
    pub update_snapshots: bool,

    /// CI mode: missing snapshots fail instead of being recorded
    #[arg(long)]
    pub ci: bool,

    /// Fixtures to build in parallel (default: one per CPU)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<NonZeroUsize>,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

impl RunArgs {
    pub fn snapshot_mode(&self) -> SnapshotMode {
        if self.update_snapshots {
            SnapshotMode::Update
        } else if self.ci {
            SnapshotMode::Ci
        } else {
            SnapshotMode::Check
        }
    }
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Fixture name globs (default: all fixtures)
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Engine values to list
    #[arg(long, value_enum, default_value = "both")]
    pub engine: EngineArg,
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Directory holding fixture projects
    #[arg(value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EngineArg {
    /// Every configured engine value
    #[default]
    Both,
    /// Only the engine flag set to true
    On,
    /// Only the engine flag set to false
    Off,
}

impl From<EngineArg> for EngineSelect {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Both => EngineSelect::Both,
            EngineArg::On => EngineSelect::On,
            EngineArg::Off => EngineSelect::Off,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

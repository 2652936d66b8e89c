// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture-driven verification of a web framework's CSS build output.

pub mod artifacts;
pub mod build;
pub mod case;
pub mod cli;
pub mod cmd_init;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fixture;
pub mod init;
pub mod output;
pub mod runner;
pub mod snapshot;
pub mod suite;
pub mod verifier;

pub use case::{Case, CaseFailure, CaseResult, CaseStatus, FailureKind};
pub use cli::{Cli, Command, InitArgs, ListArgs, OutputFormat, RunArgs};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use suite::{CaseFilter, EngineSelect, Suite};

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! cssprobe CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use cssprobe::cli::{Cli, Command};
use cssprobe::error::ExitCode;

mod cmd_list;
mod cmd_run;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("CSSPROBE_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("cssprobe: {}", e);
            match e.downcast_ref::<cssprobe::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Run(args)) => cmd_run::run(&cli, args),
        Some(Command::List(args)) => cmd_list::run(&cli, args),
        Some(Command::Init(args)) => cssprobe::cmd_init::run(args),
    }
}

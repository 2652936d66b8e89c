// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! List command implementation.

use std::io::Write;

use cssprobe::cli::{Cli, ListArgs};
use cssprobe::discovery;
use cssprobe::error::ExitCode;
use cssprobe::suite::{CaseFilter, Suite};

/// Print one case id per line, in run order.
pub fn run(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config_path = discovery::resolve_config(cli.config.as_deref(), &cwd)?;
    let suite = Suite::load(&config_path)?;

    let filter = CaseFilter::new(&args.patterns, args.engine.into())?;
    let mut stdout = std::io::stdout().lock();
    for planned in suite.cases(&filter)? {
        match &planned.skip {
            Some(reason) => writeln!(stdout, "{} (skip: {})", planned.case.id(), reason)?,
            None => writeln!(stdout, "{}", planned.case.id())?,
        }
    }

    Ok(ExitCode::Success)
}

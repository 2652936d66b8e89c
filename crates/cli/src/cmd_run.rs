// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use std::time::Instant;

use cssprobe::cli::{Cli, OutputFormat, RunArgs};
use cssprobe::color;
use cssprobe::discovery;
use cssprobe::error::ExitCode;
use cssprobe::output::json::{self, JsonFormatter};
use cssprobe::output::text::TextFormatter;
use cssprobe::runner::{RunnerConfig, SuiteRunner};
use cssprobe::snapshot::SnapshotStore;
use cssprobe::suite::{CaseFilter, Suite};
use cssprobe::verifier::Verifier;

/// Run the run command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let cwd = std::env::current_dir()?;
    let config_path = discovery::resolve_config(cli.config.as_deref(), &cwd)?;
    let suite = Suite::load(&config_path)?;

    let filter = CaseFilter::new(&args.patterns, args.engine.into())?;
    let planned = suite.cases(&filter)?;
    if planned.is_empty() {
        eprintln!("cssprobe: warning: no cases to run");
    }

    let snapshots = SnapshotStore::new(suite.snapshot_dir(), args.snapshot_mode());
    let verifier = Verifier::new(&suite.config.build, &snapshots);
    let runner = SuiteRunner::new(RunnerConfig { jobs: args.jobs });
    let results = runner.run(&verifier, planned)?;
    tracing::debug!("ran {} cases in {:?}", results.len(), start.elapsed());

    let output = json::create_output(results);
    match args.output {
        OutputFormat::Text => {
            let mut formatter = TextFormatter::new(color::resolve(args.color, args.no_color));
            formatter.write(&output)?;
        }
        OutputFormat::Json => {
            let mut formatter = JsonFormatter::new(std::io::stdout().lock());
            formatter.write(&output)?;
        }
    }

    Ok(if output.passed {
        ExitCode::Success
    } else {
        ExitCode::CaseFailed
    })
}

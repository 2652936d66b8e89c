// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <case-id>: FAIL
//!   <kind>: <message>
//!     <build output tail>
//! <case-id>: SKIP (<reason>)
//! N passed, M failed, K skipped
//! ```

use std::io::Write;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::RunOutput;
use crate::case::{CaseFailure, CaseResult, CaseStatus};
use crate::color::scheme;

/// Build output lines shown under a failed build.
pub const OUTPUT_TAIL_LINES: usize = 20;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor = StandardStream> {
    out: W,
}

impl TextFormatter {
    /// Create a formatter writing to stdout.
    pub fn new(color_choice: ColorChoice) -> Self {
        Self::with_writer(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one case result. Passing cases are silent unless they wrote snapshots.
    pub fn write_case(&mut self, result: &CaseResult) -> std::io::Result<()> {
        match result.status {
            CaseStatus::Passed => {
                for path in &result.recorded_snapshots {
                    self.write_label(&result.id)?;
                    self.out.set_color(&scheme::pass())?;
                    write!(self.out, "RECORDED")?;
                    self.out.reset()?;
                    writeln!(self.out, " {path}")?;
                }
            }
            CaseStatus::Skipped => {
                self.write_label(&result.id)?;
                self.out.set_color(&scheme::skip())?;
                write!(self.out, "SKIP")?;
                self.out.reset()?;
                match &result.skip_reason {
                    Some(reason) => writeln!(self.out, " ({reason})")?,
                    None => writeln!(self.out)?,
                }
            }
            CaseStatus::Failed => {
                self.write_label(&result.id)?;
                self.out.set_color(&scheme::fail())?;
                write!(self.out, "FAIL")?;
                self.out.reset()?;
                writeln!(self.out)?;
                if let Some(failure) = &result.failure {
                    self.write_failure(failure)?;
                }
            }
        }
        Ok(())
    }

    /// Bold case id followed by ": ".
    fn write_label(&mut self, id: &str) -> std::io::Result<()> {
        self.out.set_color(&scheme::case_id())?;
        write!(self.out, "{id}")?;
        self.out.reset()?;
        write!(self.out, ": ")
    }

    fn write_failure(&mut self, failure: &CaseFailure) -> std::io::Result<()> {
        let mut lines = failure.message.lines();
        writeln!(
            self.out,
            "  {}: {}",
            failure.kind,
            lines.next().unwrap_or_default()
        )?;

        // Continuation lines carry snapshot diffs and regex context
        for line in lines {
            let color = if line.starts_with('-') && !line.starts_with("---") {
                Some(scheme::diff_remove())
            } else if line.starts_with('+') && !line.starts_with("+++") {
                Some(scheme::diff_add())
            } else {
                None
            };
            write!(self.out, "    ")?;
            if let Some(spec) = color {
                self.out.set_color(&spec)?;
                write!(self.out, "{line}")?;
                self.out.reset()?;
                writeln!(self.out)?;
            } else {
                writeln!(self.out, "{line}")?;
            }
        }

        if let Some(stdout) = &failure.stdout {
            self.write_tail("stdout", stdout)?;
        }
        if let Some(stderr) = &failure.stderr {
            self.write_tail("stderr", stderr)?;
        }
        Ok(())
    }

    fn write_tail(&mut self, label: &str, output: &str) -> std::io::Result<()> {
        let lines: Vec<&str> = output.lines().collect();
        if lines.is_empty() {
            return Ok(());
        }
        let skipped = lines.len().saturating_sub(OUTPUT_TAIL_LINES);

        self.out.set_color(&scheme::context())?;
        if skipped > 0 {
            writeln!(self.out, "  {label} (last {OUTPUT_TAIL_LINES} of {} lines):", lines.len())?;
        } else {
            writeln!(self.out, "  {label}:")?;
        }
        self.out.reset()?;
        for line in &lines[skipped..] {
            writeln!(self.out, "    {line}")?;
        }
        Ok(())
    }

    /// Write every case, then the summary line.
    pub fn write(&mut self, output: &RunOutput) -> std::io::Result<()> {
        for case in &output.cases {
            self.write_case(case)?;
        }
        self.write_summary(output)
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, output: &RunOutput) -> std::io::Result<()> {
        let summary = output.summary();
        writeln!(
            self.out,
            "{} passed, {} failed, {} skipped",
            summary.passed, summary.failed, summary.skipped
        )
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External build invocation.
//!
//! Runs the configured build command against a fixture directory and
//! captures its exit code and output. The build is the only blocking step
//! of a case and may take tens of seconds.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::config::BuildConfig;

/// Poll interval while waiting on a build with a timeout.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long to keep collecting output after a timed-out build is killed.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Exit status and captured output of one build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Exit code (None when the process was killed by a signal).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Wall time from spawn to exit.
    pub duration: Duration,
    /// The build was killed for exceeding the timeout.
    pub timed_out: bool,
}

impl BuildResult {
    /// Whether the build exited 0 and printed the success marker.
    pub fn succeeded(&self, marker: &str) -> bool {
        self.exit_code == Some(0) && self.stdout.contains(marker)
    }
}

/// Run the build command for a fixture directory.
///
/// The fixture directory is both the working directory and the final
/// argument. A timeout kills the build; the result is marked `timed_out`
/// and carries whatever output was captured.
pub fn run_build(build: &BuildConfig, fixture_dir: &Path) -> io::Result<BuildResult> {
    let (program, args) = build.command.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "build command is empty")
    })?;

    tracing::trace!(
        "spawning {} {} {}",
        program,
        args.join(" "),
        fixture_dir.display()
    );

    let start = Instant::now();
    let mut child = Command::new(program)
        .args(args)
        .arg(fixture_dir)
        .current_dir(fixture_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain both pipes concurrently so a chatty build cannot fill one and stall
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = wait_with_timeout(&mut child, build.timeout)?;
    let duration = start.elapsed();

    let result = match status {
        Some(status) => BuildResult {
            exit_code: status.code(),
            stdout: join_output(stdout),
            stderr: join_output(stderr),
            duration,
            timed_out: false,
        },
        None => {
            let deadline = Instant::now() + DRAIN_GRACE;
            BuildResult {
                exit_code: None,
                stdout: join_within(stdout, deadline),
                stderr: join_within(stderr, deadline),
                duration,
                timed_out: true,
            }
        }
    };

    tracing::debug!(
        "build of {} exited with {:?} after {:.2?}",
        fixture_dir.display(),
        result.exit_code,
        result.duration
    );

    Ok(result)
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).ok();
        buf
    })
}

fn join_output(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Join a drain thread unless it is still running at `deadline`.
///
/// A grandchild of a killed build may still hold the pipe open; its drain
/// thread is left detached.
fn join_within(handle: Option<JoinHandle<Vec<u8>>>, deadline: Instant) -> String {
    let Some(handle) = handle else {
        return String::new();
    };
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            return String::new();
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    join_output(Some(handle))
}

/// Wait for the child, killing it once `timeout` elapses. None on timeout.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Option<Duration>,
) -> io::Result<Option<ExitStatus>> {
    let Some(limit) = timeout else {
        return child.wait().map(Some);
    };

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() > limit {
            tracing::debug!("killing build after {:?}", limit);
            child.kill().ok();
            child.wait().ok();
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;

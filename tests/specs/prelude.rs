//! Test helpers for behavioral specifications.
//!
//! Provides high-level DSL for testing cssprobe CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Placeholder in the fixture suite config replaced with the fake build script.
const FAKE_NEXT_PLACEHOLDER: &str = "@FAKE_NEXT@";

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the cssprobe binary
pub fn cssprobe_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cssprobe"));
    // Keep specs independent of the developer's environment
    cmd.env_remove("CSSPROBE_CONFIG")
        .env_remove("CSSPROBE_LOG")
        .env_remove("TURBOPACK")
        .env_remove("NO_COLOR")
        .env_remove("COLOR");
    cmd
}

/// Create a `cssprobe run` builder
pub fn run() -> RunBuilder<Text> {
    RunBuilder::new()
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// High-level run builder for fluent test assertions
pub struct RunBuilder<Mode = Text> {
    dir: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

impl RunBuilder<Text> {
    fn new() -> Self {
        Self {
            dir: None,
            args: Vec::new(),
            envs: Vec::new(),
            _mode: PhantomData,
        }
    }

    pub fn json(self) -> RunBuilder<Json> {
        RunBuilder {
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        run_passes(self.command())
    }

    pub fn fails(self) -> RunAssert {
        run_exits(self.command(), 1)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

impl RunBuilder<Json> {
    pub fn passes(self) -> RunJson {
        let output = run_passes(self.command());
        RunJson::new(&output.output.stdout)
    }

    pub fn fails(self) -> RunJson {
        let output = run_exits(self.command(), 1);
        RunJson::new(&output.output.stdout)
    }
}

impl<Mode: 'static> RunBuilder<Mode> {
    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    fn command(self) -> Command {
        let mut cmd = cssprobe_cmd();
        cmd.arg("run");

        if std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>() {
            cmd.args(["-o", "json"]);
        }

        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd
    }
}

fn run_passes(mut cmd: Command) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "expected run to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}\nstdout: {}\nstderr: {}",
        code,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    ///
    /// ```ignore
    /// .stdout_has("FAIL")  // contains
    /// .stdout_has(predicates::str::is_match(r"^\d+ passed").unwrap())
    /// ```
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Parsed JSON output of `cssprobe run -o json`
pub struct RunJson {
    value: serde_json::Value,
}

impl RunJson {
    fn new(stdout: &[u8]) -> Self {
        let value = serde_json::from_slice(stdout).unwrap_or_else(|e| {
            panic!(
                "stdout should be valid JSON: {e}\n{}",
                String::from_utf8_lossy(stdout)
            )
        });
        Self { value }
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }

    pub fn cases(&self) -> &Vec<serde_json::Value> {
        self.value["cases"].as_array().expect("cases should be an array")
    }

    /// Case ids in output order
    pub fn ids(&self) -> Vec<&str> {
        self.cases()
            .iter()
            .filter_map(|c| c["id"].as_str())
            .collect()
    }

    /// Get a case by id, panicking if absent
    pub fn case(&self, id: &str) -> &serde_json::Value {
        self.cases()
            .iter()
            .find(|c| c["id"] == id)
            .unwrap_or_else(|| panic!("case {id} not found in {:?}", self.ids()))
    }
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

// =============================================================================
// Project
// =============================================================================

/// Temporary test project directory with helper methods.
///
/// ```ignore
/// // Copy of the fixture suite, wired to the fake build tool
/// let temp = Project::suite();
/// run().pwd(temp.path()).args(&["single-global"]).passes();
///
/// // Empty project (for init tests)
/// let temp = Project::empty();
/// cssprobe_cmd().args(["init"]).current_dir(temp.path());
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Copy `tests/fixtures/css-suite` and point its build at the fake tool.
    pub fn suite() -> Self {
        let temp = Self::empty();
        copy_dir(&fixture("css-suite"), temp.path());

        let config_path = temp.path().join("cssprobe.toml");
        let config = std::fs::read_to_string(&config_path).unwrap();
        let script = temp.path().join("fake-next.sh");
        std::fs::write(
            &config_path,
            config.replace(FAKE_NEXT_PLACEHOLDER, script.to_str().unwrap()),
        )
        .unwrap();
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write cssprobe.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("cssprobe.toml"), content).unwrap();
    }

    /// Append to cssprobe.toml
    pub fn append_config(&self, content: &str) {
        let path = self.dir.path().join("cssprobe.toml");
        let existing = std::fs::read_to_string(&path).unwrap();
        std::fs::write(path, format!("{existing}\n{content}")).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Read a file relative to the project
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path.as_ref())).unwrap()
    }
}

fn copy_dir(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            std::fs::copy(entry.path(), target).unwrap();
        }
    }
}

//! Behavioral specs for suite config discovery and validation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > A missing config is a config error pointing at init.
#[test]
fn missing_config_exits_2() {
    let temp = Project::empty();
    // Stop discovery at the temp dir
    std::fs::create_dir(temp.path().join(".git")).unwrap();

    cssprobe_cmd()
        .arg("run")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("no cssprobe.toml found"))
        .stderr(predicates::str::contains("cssprobe init"));
}

/// > The config is discovered from a subdirectory.
#[test]
fn config_is_discovered_from_parent() {
    let temp = Project::suite();
    cssprobe_cmd()
        .args(["list", "*-prefix-1"])
        .current_dir(temp.path().join("single-global/pages"))
        .assert()
        .success()
        .stdout("url-global-asset-prefix-1\n");
}

/// > -C points at an explicit config file.
#[test]
fn config_flag_selects_file() {
    let temp = Project::suite();
    let other = Project::empty();
    cssprobe_cmd()
        .args(["-C", temp.path().join("cssprobe.toml").to_str().unwrap()])
        .args(["list", "*-prefix-1"])
        .current_dir(other.path())
        .assert()
        .success()
        .stdout("url-global-asset-prefix-1\n");
}

/// > CSSPROBE_CONFIG sets config file location.
#[test]
fn env_config_sets_path() {
    let temp = Project::suite();
    let other = Project::empty();
    cssprobe_cmd()
        .args(["list", "*-prefix-1"])
        .env("CSSPROBE_CONFIG", temp.path().join("cssprobe.toml"))
        .current_dir(other.path())
        .assert()
        .success()
        .stdout("url-global-asset-prefix-1\n");
}

/// > An explicit config that doesn't exist is an error.
#[test]
fn missing_explicit_config_exits_2() {
    let temp = Project::empty();
    cssprobe_cmd()
        .args(["-C", "nope.toml", "list"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("config file not found"));
}

/// > version must be 1.
#[test]
fn unsupported_version_exits_2() {
    let temp = Project::empty();
    temp.config("version = 2\n");
    cssprobe_cmd()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported config version 2"));
}

/// > Fixture names must be unique.
#[test]
fn duplicate_fixture_exits_2() {
    let temp = Project::empty();
    temp.config(
        r#"
[[fixture]]
name = "app"
path = "a"

[[fixture]]
name = "app"
path = "b"
"#,
    );
    cssprobe_cmd()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("duplicate fixture name `app`"));
}

/// > Unknown keys are warnings, not errors.
#[test]
fn unknown_key_warns() {
    let temp = Project::empty();
    temp.config(
        r#"
[[fixture]]
name = "app"
path = "app"
snapshots = true
"#,
    );
    cssprobe_cmd()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("app\n")
        .stderr(predicates::str::contains("unrecognized field"))
        .stderr(predicates::str::contains("snapshot"));
}

/// > A valid config produces no warnings.
#[test]
fn valid_config_no_warnings() {
    let temp = Project::suite();
    cssprobe_cmd()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicates::str::is_empty());
}

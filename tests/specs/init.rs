//! Behavioral specs for `cssprobe init`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// Suite copy without its config, as a fresh fixture directory would be.
fn unconfigured_suite() -> Project {
    let temp = Project::suite();
    std::fs::remove_file(temp.path().join("cssprobe.toml")).unwrap();
    temp
}

/// > init writes a config listing every fixture directory.
#[test]
fn init_detects_fixtures() {
    let temp = unconfigured_suite();

    cssprobe_cmd()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("with 9 fixtures"));

    let config = temp.read("cssprobe.toml");
    assert!(config.contains("version = 1"));
    assert!(config.contains("name = \"single-global-special-characters/a+b\""));
    assert!(config.contains("base_config = \"../../next.config.js\""));
    assert!(config.contains("name = \"url-global\""));
}

/// > The generated config is immediately usable.
#[test]
fn init_output_lists_cases() {
    let temp = unconfigured_suite();
    cssprobe_cmd()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .success();

    cssprobe_cmd()
        .args(["list", "multi-global"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout("multi-global@useLightningcss=true\nmulti-global@useLightningcss=false\n");
}

/// > init takes the fixture directory as an argument.
#[test]
fn init_writes_into_given_dir() {
    let temp = Project::empty();
    temp.file("css-fixtures/app/next.config.js", "module.exports = {}");

    cssprobe_cmd()
        .args(["init", "css-fixtures"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("with 1 fixture"));

    let config = temp.read("css-fixtures/cssprobe.toml");
    assert!(config.contains("path = \"app\""));
    assert!(config.contains("# base_config"));
}

/// > init refuses to overwrite an existing config.
#[test]
fn init_refuses_to_overwrite() {
    let temp = Project::suite();
    let before = temp.read("cssprobe.toml");

    cssprobe_cmd()
        .arg("init")
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("already exists"));

    assert_eq!(temp.read("cssprobe.toml"), before);
}

/// > init on a missing directory is an argument error.
#[test]
fn init_missing_dir_exits_2() {
    let temp = Project::empty();
    cssprobe_cmd()
        .args(["init", "does-not-exist"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("not a directory"));
}

//! Behavioral specs for `cssprobe list`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Prints one case id per line, in run order.
#[test]
fn lists_every_case() {
    let temp = Project::suite();
    cssprobe_cmd()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(
            "single-global@useLightningcss=true\n\
             single-global@useLightningcss=false\n\
             single-global-src@useLightningcss=true\n\
             single-global-src@useLightningcss=false\n\
             single-global-special-characters/a+b@useLightningcss=true\n\
             single-global-special-characters/a+b@useLightningcss=false\n\
             multi-global@useLightningcss=true\n\
             multi-global@useLightningcss=false\n\
             multi-global-reversed@useLightningcss=true\n\
             multi-global-reversed@useLightningcss=false\n\
             nested-global@useLightningcss=true\n\
             nested-global@useLightningcss=false\n\
             url-global@useLightningcss=true\n\
             url-global@useLightningcss=false\n\
             url-global-asset-prefix-1\n\
             url-global-asset-prefix-2\n",
        );
}

/// > Listing never runs a build.
#[test]
fn list_does_not_build() {
    let temp = Project::suite();
    cssprobe_cmd()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success();
    assert!(!temp.path().join("single-global/.next").exists());
    assert_eq!(
        temp.read("single-global/next.config.js"),
        "module.exports = {}\n"
    );
}

/// > Patterns and --engine filter the list the same way as run.
#[test]
fn list_filters_like_run() {
    let temp = Project::suite();
    cssprobe_cmd()
        .args(["list", "url-*", "single-global", "--engine", "off"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(
            "single-global@useLightningcss=false\n\
             url-global@useLightningcss=false\n\
             url-global-asset-prefix-1\n\
             url-global-asset-prefix-2\n",
        );
}

/// > Skipped cases carry their reason.
#[test]
fn list_marks_skipped_cases() {
    let temp = Project::suite();
    cssprobe_cmd()
        .args(["list", "url-global"])
        .env("TURBOPACK", "1")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(
            "url-global@useLightningcss=true (skip: TURBOPACK is set)\n\
             url-global@useLightningcss=false (skip: TURBOPACK is set)\n",
        );
}

/// > An invalid glob is an argument error.
#[test]
fn invalid_pattern_exits_2() {
    let temp = Project::suite();
    cssprobe_cmd()
        .args(["list", "single-["])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid fixture pattern"));
}

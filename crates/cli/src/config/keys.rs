// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unknown key detection for cssprobe.toml.
//!
//! Unknown keys are warnings, not errors, so newer configs still load.

use std::path::Path;

const TOP_LEVEL_KEYS: &[&str] = &["version", "build", "engine", "snapshots", "fixture"];

const BUILD_KEYS: &[&str] = &[
    "command",
    "success_marker",
    "timeout",
    "output_dir",
    "css_dir",
    "media_dir",
    "config_file",
];

const ENGINE_KEYS: &[&str] = &["flag", "values"];

const SNAPSHOTS_KEYS: &[&str] = &["dir"];

const FIXTURE_KEYS: &[&str] = &[
    "name",
    "path",
    "base_config",
    "css_files",
    "contains",
    "matches",
    "snapshot",
    "media_files",
    "media_names",
    "skip_if_env",
];

/// Collect dotted paths of keys cssprobe does not recognize.
///
/// Fixture keys are reported as `fixture[<index>].<key>`.
pub(super) fn unknown_keys(table: &toml::Table) -> Vec<String> {
    let mut unknown = Vec::new();

    for (key, value) in table {
        let known_children = match key.as_str() {
            "build" => BUILD_KEYS,
            "engine" => ENGINE_KEYS,
            "snapshots" => SNAPSHOTS_KEYS,
            "fixture" => {
                if let Some(fixtures) = value.as_array() {
                    for (index, fixture) in fixtures.iter().enumerate() {
                        let Some(fixture) = fixture.as_table() else {
                            continue;
                        };
                        for child in fixture.keys() {
                            if !FIXTURE_KEYS.contains(&child.as_str()) {
                                unknown.push(format!("fixture[{index}].{child}"));
                            }
                        }
                    }
                }
                continue;
            }
            k if TOP_LEVEL_KEYS.contains(&k) => continue,
            _ => {
                unknown.push(key.clone());
                continue;
            }
        };

        if let Some(section) = value.as_table() {
            for child in section.keys() {
                if !known_children.contains(&child.as_str()) {
                    unknown.push(format!("{key}.{child}"));
                }
            }
        }
    }

    unknown
}

/// Suggest a known key for a likely typo of the last path segment.
pub(super) fn suggest_key(dotted: &str) -> Option<&'static str> {
    let (section, leaf) = match dotted.rsplit_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", dotted),
    };
    if leaf.len() < 3 {
        return None;
    }

    let candidates = match section {
        "" => TOP_LEVEL_KEYS,
        "build" => BUILD_KEYS,
        "engine" => ENGINE_KEYS,
        "snapshots" => SNAPSHOTS_KEYS,
        s if s.starts_with("fixture[") => FIXTURE_KEYS,
        _ => return None,
    };

    // Plural/singular slips and prefix matches ("media" -> "media_files")
    candidates.iter().copied().find(|&known| {
        known.trim_end_matches('s') == leaf.trim_end_matches('s')
            || known.starts_with(leaf)
            || leaf.starts_with(known)
    })
}

/// Warn about an unrecognized config key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    match suggest_key(key) {
        Some(suggested) => eprintln!(
            "cssprobe: warning: {}: unrecognized field `{}` (ignored). Did you mean `{}`?",
            path.display(),
            key,
            suggested
        ),
        None => eprintln!(
            "cssprobe: warning: {}: unrecognized field `{}` (ignored)",
            path.display(),
            key
        ),
    }
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;

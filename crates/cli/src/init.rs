// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Init command detection and template output.

use std::path::Path;

/// Directory levels searched below the init directory.
const MAX_FIXTURE_DEPTH: usize = 2;

/// A fixture project found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedFixture {
    /// Path relative to the init directory, `/`-separated.
    pub path: String,
    /// Directory levels below the init directory.
    pub depth: usize,
}

/// Find fixture projects: directories holding `config_file`.
///
/// A directory that is itself a fixture is not searched further.
/// Hidden directories and `node_modules` are ignored. Results are sorted.
pub fn detect_fixtures(root: &Path, config_file: &str) -> std::io::Result<Vec<DetectedFixture>> {
    let mut found = Vec::new();
    scan(root, "", 1, config_file, &mut found)?;
    found.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(found)
}

fn scan(
    dir: &Path,
    prefix: &str,
    depth: usize,
    config_file: &str,
    found: &mut Vec<DetectedFixture>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name == "node_modules" {
            continue;
        }

        let path = format!("{prefix}{name}");
        if entry.path().join(config_file).is_file() {
            found.push(DetectedFixture { path, depth });
        } else if depth < MAX_FIXTURE_DEPTH {
            scan(&entry.path(), &format!("{path}/"), depth + 1, config_file, found)?;
        }
    }
    Ok(())
}

/// Render a starter cssprobe.toml.
///
/// With `shared_config`, every fixture gets a `base_config` pointing at it
/// and is built once per engine value.
pub fn render_template(fixtures: &[DetectedFixture], shared_config: Option<&str>) -> String {
    let mut out = String::from(
        "# cssprobe suite configuration\n\
         version = 1\n\
         \n\
         [build]\n\
         command = [\"npx\", \"next\", \"build\"]\n\
         success_marker = \"Compiled successfully\"\n\
         # timeout = \"5m\"\n\
         \n\
         [engine]\n\
         flag = \"useLightningcss\"\n\
         values = [true, false]\n",
    );

    for fixture in fixtures {
        out.push_str("\n[[fixture]]\n");
        out.push_str(&format!("name = {}\n", quote(&fixture.path)));
        out.push_str(&format!("path = {}\n", quote(&fixture.path)));
        match shared_config {
            Some(config) => {
                let base = format!("{}{}", "../".repeat(fixture.depth), config);
                out.push_str(&format!("base_config = {}\n", quote(&base)));
            }
            None => out.push_str("# base_config = \"../next.config.js\"\n"),
        }
        out.push_str("css_files = 1\n");
    }

    out
}

fn quote(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;

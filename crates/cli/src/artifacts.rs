// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build output inspection.
//!
//! Provides:
//! - Directory listing with extension filtering
//! - Comment stripping for emitted CSS
//! - Content-hash removal from emitted file names
//! - CSS size measurement (raw and gzipped)

use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Block comments, matched lazily and never across lines.
#[allow(clippy::expect_used)]
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*.*?\*/").expect("valid regex"));

/// `<name>.<8-char hash>.<extension>`
#[allow(clippy::expect_used)]
static HASHED_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\..{8}\.(.+?)$").expect("valid regex"));

/// List entry names in a directory, sorted.
pub fn list_dir(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Keep names ending in `.<extension>`.
pub fn filter_by_extension(names: &[String], extension: &str) -> Vec<String> {
    let suffix = format!(".{extension}");
    names
        .iter()
        .filter(|name| name.ends_with(&suffix))
        .cloned()
        .collect()
}

/// Remove `/* ... */` comments and surrounding whitespace.
pub fn strip_comments(css: &str) -> String {
    COMMENT_RE.replace_all(css, "").trim().to_string()
}

/// Remove the content hash from an emitted file name.
///
/// `dark.8c3a1b2f.svg` becomes `dark.svg`. Returns None when the name has
/// no hash segment.
pub fn logical_name(file_name: &str) -> Option<String> {
    let caps = HASHED_NAME_RE.captures(file_name)?;
    Some(format!("{}.{}", &caps[1], &caps[2]))
}

/// Sorted logical names for a set of emitted files.
///
/// Errors with the first file name lacking a hash segment.
pub fn logical_names(file_names: &[String]) -> Result<Vec<String>, String> {
    let mut names = file_names
        .iter()
        .map(|name| logical_name(name).ok_or_else(|| name.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    Ok(names)
}

/// Stylesheet size metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CssSize {
    /// Raw file size in bytes.
    pub raw: u64,
    /// Gzipped file size in bytes.
    pub gzipped: u64,
}

/// Measure raw and gzipped size of emitted CSS.
pub fn measure_css(content: &[u8]) -> std::io::Result<CssSize> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(content)?;
    let gzipped = encoder.finish()?.len() as u64;

    Ok(CssSize {
        raw: content.len() as u64,
        gzipped,
    })
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;

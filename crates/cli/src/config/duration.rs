// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build timeout parsing.
//!
//! Accepts a number followed by a unit: `500ms`, `90s`, `1.5m`, `1h`.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Unit suffixes and their length in milliseconds. `ms` precedes `m` and `s`.
const UNITS: &[(&str, u64)] = &[("ms", 1), ("s", 1_000), ("m", 60_000), ("h", 3_600_000)];

/// Parse a timeout string such as `"5m"` into a Duration.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let Some((number, scale)) = UNITS
        .iter()
        .find_map(|(suffix, scale)| s.strip_suffix(suffix).map(|n| (n.trim(), *scale)))
    else {
        return Err(format!(
            "invalid duration format: {s} (use 500ms, 90s, 5m, or 1h)"
        ));
    };

    if let Ok(whole) = number.parse::<u64>() {
        return whole
            .checked_mul(scale)
            .map(Duration::from_millis)
            .ok_or_else(|| format!("duration out of range: {s}"));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration: {s}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("invalid duration: {s}"));
    }

    Ok(Duration::from_secs_f64(value * scale as f64 / 1000.0))
}

/// Deserialize an optional timeout string.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;

// Copyright 2025 the Vizlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label formatting helpers.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Category labels longer than this are truncated.
pub const MAX_TICK_CHARS: usize = 10;

/// Formats a tick value, dropping floating-point noise like `0.30000000000000004`.
pub fn format_tick(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let rounded = (value * 1e9).round() / 1e9;
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Shortens a category label to at most `MAX_TICK_CHARS - 1` characters plus `...`.
pub fn truncate_tick(label: &str) -> String {
    if label.chars().count() > MAX_TICK_CHARS {
        let mut out: String = label.chars().take(MAX_TICK_CHARS - 1).collect();
        out.push_str("...");
        out
    } else {
        String::from(label)
    }
}

/// Formats a heat-map cell value: at most 5 characters for positive values and 6 otherwise,
/// so a leading minus sign does not cost a digit.
pub fn format_cell_value(value: f64) -> String {
    let text = format_tick(value);
    let limit = if value > 0.0 { 5 } else { 6 };
    text.chars().take(limit).collect()
}

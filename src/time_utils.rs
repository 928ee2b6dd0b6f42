// SPDX-License-Identifier: MIT

//! Shared helpers for elapsed-time and distance formatting.

/// Format elapsed seconds as `MM:SS` with zero-padding.
///
/// The minutes field grows past 99 rather than wrapping.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format a distance in meters as kilometers with exactly two decimals.
pub fn format_distance_km(meters: f64) -> String {
    format!("{:.2}", meters / 1000.0)
}

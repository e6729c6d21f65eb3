//! Human-readable file size formatting.

use std::path::Path;

/// Format a byte count as kilobytes with one decimal, e.g. `12.3 KB`.
pub fn format_kb(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)] // display only
    let kb = bytes as f64 / 1024.0;
    format!("{kb:.1} KB")
}

/// Size of a file on disk, formatted with [`format_kb`].
///
/// Returns `None` when the file cannot be stat'ed.
pub fn file_size_kb(path: &Path) -> Option<String> {
    std::fs::metadata(path).ok().map(|m| format_kb(m.len()))
}

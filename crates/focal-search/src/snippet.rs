//! Context snippets around a hit line.

use std::io::{BufRead, BufReader};
use std::path::Path;

/// Default context radius in lines.
pub const DEFAULT_RADIUS: usize = 4;

/// Read the window `[center_line - radius, center_line + radius]` from
/// `path`, clamped to file bounds.
///
/// The center line is prefixed `>>`, context lines with two spaces; line
/// numbers are right-aligned. Returns an empty string on any read
/// failure — a snippet is decoration, never an error.
#[must_use]
pub fn read_snippet(path: &Path, center_line: usize, radius: usize) -> String {
    // Line numbers are 1-based; 0 is out of bounds like a line past EOF.
    if center_line == 0 {
        return String::new();
    }
    let Ok(lines) = read_lines_lossy(path) else {
        return String::new();
    };

    let start = center_line.saturating_sub(radius).max(1);
    let end = center_line.saturating_add(radius).min(lines.len());
    if start > end {
        return String::new();
    }

    let mut out: Vec<String> = Vec::with_capacity(end - start + 1);
    for i in start..=end {
        let prefix = if i == center_line { ">>" } else { "  " };
        out.push(format!("{prefix} {i:>5}: {}", lines[i - 1].trim_end()));
    }
    out.join("\n")
}

/// Read a whole file as lossy-decoded lines.
fn read_lines_lossy(path: &Path) -> std::io::Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut lines = Vec::new();
    let mut buf: Vec<u8> = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    Ok(lines)
}

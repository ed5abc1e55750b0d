//! Extension histogram over the search root.

use std::collections::HashMap;
use std::path::Path;

use crate::walk::iter_files;

/// Bucket label for files with no extension.
pub const NO_EXTENSION: &str = "<none>";

/// Count files per lowercased extension under `root`.
///
/// Reuses the search enumeration (same ignore set, same file cap).
/// Sorted descending by count, then by extension so the order is stable.
#[must_use]
pub fn file_stats(root: &Path, max_files: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for path in iter_files(root, max_files) {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map_or_else(|| NO_EXTENSION.to_string(), str::to_ascii_lowercase);
        *counts.entry(ext).or_insert(0) += 1;
    }

    let mut stats: Vec<(String, usize)> = counts.into_iter().collect();
    stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    stats
}

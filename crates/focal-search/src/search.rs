//! Line search over probable-text files.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::classify::is_probably_text;
use crate::errors::SearchError;
use crate::walk::{DEFAULT_MAX_FILES, iter_files};

/// Default cap on total hits per search.
pub const DEFAULT_MAX_HITS: usize = 200;

/// Options controlling a search run.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Treat the query as a regular expression instead of a literal.
    pub regex: bool,
    /// Match case-sensitively.
    pub case_sensitive: bool,
    /// Stop after this many hits across all files.
    pub max_hits: usize,
    /// Stop enumerating after this many files.
    pub max_files: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            regex: false,
            case_sensitive: false,
            max_hits: DEFAULT_MAX_HITS,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

/// One line-level match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileHit {
    /// File the match was found in.
    pub path: PathBuf,
    /// 1-based line number.
    pub line_no: usize,
    /// Line content with the trailing newline stripped.
    pub line: String,
}

/// Compile the query once, honoring literal escaping and case options.
fn compile_query(query: &str, options: &SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(SearchError::from)
}

/// Search files under `root` for lines matching `query`.
///
/// A trimmed-empty query returns no hits without touching the
/// filesystem. An invalid regex fails the whole search; every other
/// failure is per-file and skipped.
#[tracing::instrument(skip(root), fields(root = %root.display()))]
pub fn search_files(
    root: &Path,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<FileHit>, SearchError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let pattern = compile_query(query, options)?;

    let mut hits: Vec<FileHit> = Vec::new();
    for path in iter_files(root, options.max_files) {
        if hits.len() >= options.max_hits {
            break;
        }
        if !is_probably_text(&path) {
            continue;
        }
        if scan_file(&path, &pattern, options.max_hits, &mut hits).is_err() {
            // Unreadable file: skip and continue with the rest.
            continue;
        }
    }

    tracing::debug!(hits = hits.len(), "search finished");
    Ok(hits)
}

/// Scan a single file, appending matching lines until the global cap.
fn scan_file(
    path: &Path,
    pattern: &Regex,
    max_hits: usize,
    hits: &mut Vec<FileHit>,
) -> std::io::Result<()> {
    let file = std::fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut buf: Vec<u8> = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        if pattern.is_match(line) {
            hits.push(FileHit {
                path: path.to_path_buf(),
                line_no,
                line: line.to_string(),
            });
            if hits.len() >= max_hits {
                break;
            }
        }
    }
    Ok(())
}

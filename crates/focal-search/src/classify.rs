//! Probable-text classification.
//!
//! A file is eligible for line search if its extension is on the
//! allow-list, or failing that, if a sample of its leading bytes contains
//! almost no NULs. Files that cannot be opened are treated as non-text.

use std::io::Read;
use std::path::Path;

/// Extensions accepted without sniffing file content.
pub const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "py", "js", "ts", "tsx", "json", "yaml", "yml", "toml", "csv", "log", "html",
    "css", "sql", "rs",
];

/// Bytes sampled from the head of a file when sniffing.
const SNIFF_BYTES: usize = 2048;

/// Maximum NUL-byte fraction for a sniffed file to count as text.
const MAX_NUL_FRACTION: f64 = 0.01;

/// Decide whether `path` probably holds human-readable text.
#[must_use]
pub fn is_probably_text(path: &Path) -> bool {
    if path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext.as_str()))
    {
        return true;
    }

    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };
    let mut sample = Vec::with_capacity(SNIFF_BYTES);
    if file
        .take(SNIFF_BYTES as u64)
        .read_to_end(&mut sample)
        .is_err()
    {
        return false;
    }
    if sample.is_empty() {
        return true;
    }
    let nul_count = sample.iter().filter(|&&b| b == 0).count();
    (nul_count as f64 / sample.len() as f64) < MAX_NUL_FRACTION
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn known_extension_is_text_without_sniffing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, [0u8; 64]).unwrap();
        // Extension wins even though the content is all NULs.
        assert!(is_probably_text(&path));
    }

    #[test]
    fn binary_content_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0u8; 256]).unwrap();
        assert!(!is_probably_text(&path));
    }

    #[test]
    fn plain_content_without_extension_is_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README");
        fs::write(&path, b"hello world\n").unwrap();
        assert!(is_probably_text(&path));
    }

    #[test]
    fn empty_file_is_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, b"").unwrap();
        assert!(is_probably_text(&path));
    }

    #[test]
    fn missing_file_is_not_text() {
        assert!(!is_probably_text(Path::new("/nonexistent/file")));
    }
}

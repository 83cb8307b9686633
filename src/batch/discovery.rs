//! Input file discovery for folder processing.
//!
//! Walks a directory recursively and collects files with a given extension.

use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error during file discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Invalid glob pattern
    #[error("Invalid glob pattern '{0}': {1}")]
    InvalidPattern(String, glob::PatternError),
}

/// Recursively find files under `dir` whose extension matches `extension`
/// (ASCII case-insensitive, without the dot). Results are sorted.
pub fn discover_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let pattern = format!("{}/**/*", Pattern::escape(&dir.to_string_lossy()));
    let paths = glob(&pattern).map_err(|e| DiscoveryError::InvalidPattern(pattern.clone(), e))?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() && has_extension(&path, extension) {
                    files.push(path);
                }
            }
            Err(e) => {
                // Log but continue on unreadable entries
                log::warn!("error reading path: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Check a path's extension, ignoring ASCII case.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_recursive_case_insensitive() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("chars/heroes")).unwrap();
        fs::write(root.join("b.json"), "[]").unwrap();
        fs::write(root.join("chars/a.JSON"), "[]").unwrap();
        fs::write(root.join("chars/heroes/c.json"), "[]").unwrap();
        fs::write(root.join("chars/notes.txt"), "").unwrap();

        let files = discover_files(root, "json").unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("b.json"),
                PathBuf::from("chars/a.JSON"),
                PathBuf::from("chars/heroes/c.json"),
            ]
        );
    }

    #[test]
    fn test_discover_empty_dir() {
        let temp = tempfile::tempdir().unwrap();
        assert!(discover_files(temp.path(), "png").unwrap().is_empty());
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("x.PNG"), "png"));
        assert!(!has_extension(Path::new("x.png.bak"), "png"));
        assert!(!has_extension(Path::new("png"), "png"));
    }
}

//! File scanning utilities for discovering TOML/JSON configuration files

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::Format;

pub struct FileScanner;

impl FileScanner {
    /// Check if a file has a supported configuration extension
    pub fn is_config_file(path: &Path) -> bool {
        Format::from_path(path).is_some()
    }

    /// Scan a directory for config files (non-recursive), sorted by path
    pub fn scan_directory(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_file() && Self::is_config_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    /// Recursively scan for config files, sorted by path
    pub fn scan_directory_recursive(dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file() && Self::is_config_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_scan_directory_filters_and_sorts() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("b.json"));
        touch(&root.join("a.toml"));
        touch(&root.join("notes.md"));
        touch(&root.join("nested/c.toml"));

        let files = FileScanner::scan_directory(root).unwrap();
        assert_eq!(files, vec![root.join("a.toml"), root.join("b.json")]);
    }

    #[test]
    fn test_scan_directory_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.toml"));
        touch(&root.join("nested/deeper/c.JSON"));
        touch(&root.join("nested/readme.txt"));

        let files = FileScanner::scan_directory_recursive(root).unwrap();
        assert_eq!(
            files,
            vec![root.join("a.toml"), root.join("nested/deeper/c.JSON")]
        );
    }

    #[test]
    fn test_scan_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(FileScanner::scan_directory(&temp_dir.path().join("missing")).is_err());
    }
}

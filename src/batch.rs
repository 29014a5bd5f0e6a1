//! Validate every configuration file in a directory

use miette::Diagnostic;
use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::loader::{FileScanner, LoadError, load_document};
use crate::models::ValidationResult;
use crate::validation::Validator;

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Descend into subdirectories
    pub recursive: bool,
}

#[derive(Error, Debug, Diagnostic)]
pub enum BatchError {
    #[error("config directory not found: {}", path.display())]
    #[diagnostic(code(anchorcheck::batch::no_directory))]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to scan {}: {cause}", path.display())]
    #[diagnostic(code(anchorcheck::batch::scan))]
    Scan { path: PathBuf, cause: std::io::Error },

    #[error("no config files found in {}", path.display())]
    #[diagnostic(
        code(anchorcheck::batch::empty),
        help("only files ending in .toml or .json are validated; pass --recursive to search subdirectories")
    )]
    NoConfigFiles { path: PathBuf },
}

#[derive(Debug)]
pub enum FileOutcome {
    Checked(ValidationResult),
    /// The file could not be turned into a document at all
    Unreadable(LoadError),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, FileOutcome::Checked(result) if result.is_valid())
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        match &self.outcome {
            FileOutcome::Checked(result) => Some(result),
            FileOutcome::Unreadable(_) => None,
        }
    }
}

impl Serialize for FileReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FileReport", 3)?;
        state.serialize_field("path", &self.path)?;
        match &self.outcome {
            FileOutcome::Checked(result) => {
                state.serialize_field("result", result)?;
            }
            FileOutcome::Unreadable(error) => {
                state.serialize_field("load_error", &error.to_string())?;
            }
        }
        state.serialize_field("valid", &self.passed())?;
        state.end()
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub directory: PathBuf,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn passed(&self) -> bool {
        self.files.iter().all(FileReport::passed)
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| !f.passed())
    }

    pub fn total_errors(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.result().map_or(1, ValidationResult::error_count))
            .sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.files
            .iter()
            .filter_map(FileReport::result)
            .map(ValidationResult::warning_count)
            .sum()
    }
}

impl Serialize for BatchReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BatchReport", 3)?;
        state.serialize_field("directory", &self.directory)?;
        state.serialize_field("valid", &self.passed())?;
        state.serialize_field("files", &self.files)?;
        state.end()
    }
}

/// Validate every TOML/JSON file found in `dir`
pub fn run(
    dir: &Path,
    options: BatchOptions,
    validator: &Validator,
) -> Result<BatchReport, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let scanned = if options.recursive {
        FileScanner::scan_directory_recursive(dir)
    } else {
        FileScanner::scan_directory(dir)
    };
    let paths = scanned.map_err(|cause| BatchError::Scan {
        path: dir.to_path_buf(),
        cause,
    })?;

    if paths.is_empty() {
        return Err(BatchError::NoConfigFiles {
            path: dir.to_path_buf(),
        });
    }

    info!(
        "Validating {} configuration files in {}",
        paths.len(),
        dir.display()
    );
    let files = paths
        .iter()
        .map(|path| check_file(path, validator))
        .collect();

    Ok(BatchReport {
        directory: dir.to_path_buf(),
        files,
    })
}

/// Load and validate a single file, keeping load failures as an outcome
pub fn check_file(path: &Path, validator: &Validator) -> FileReport {
    let outcome = match load_document(path) {
        Ok(document) => {
            let result = validator.validate(&document);
            info!(
                valid = result.is_valid(),
                errors = result.error_count(),
                warnings = result.warning_count(),
                "Checked {}",
                path.display()
            );
            FileOutcome::Checked(result)
        }
        Err(error) => {
            info!("Could not load {}: {error}", path.display());
            FileOutcome::Unreadable(error)
        }
    };

    FileReport {
        path: path.to_path_buf(),
        outcome,
    }
}

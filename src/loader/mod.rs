//! Turns configuration files into documents the validator can traverse

mod error;
mod file_scanner;

pub use error::{Format, LoadError, ParseError};
pub use file_scanner::FileScanner;

use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::models::Document;

/// Read and parse a TOML or JSON configuration file
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|cause| LoadError::Read {
        path: path.to_path_buf(),
        cause,
    })?;

    debug!("Loading {} as {format}", path.display());
    parse_document(path, &content, format)
}

/// Parse already-read content. `path` is only used for error reporting.
pub fn parse_document(path: &Path, content: &str, format: Format) -> Result<Document, LoadError> {
    let value: Value = match format {
        Format::Toml => toml::from_str(content)
            .map_err(|e| ParseError::from_toml(path, content, e))?,
        Format::Json => serde_json::from_str(content)
            .map_err(|e| ParseError::from_json(path, content, e))?,
    };

    Document::try_from(value).map_err(|reason| LoadError::Malformed {
        path: path.to_path_buf(),
        reason,
    })
}

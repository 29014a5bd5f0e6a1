//! Structural load errors with miette integration
//!
//! These abort validation of a single file. They are never mixed into the
//! content diagnostics produced by the validator.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::MalformedDocument;

/// Source formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Pick a format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Toml => f.write_str("TOML"),
            Format::Json => f.write_str("JSON"),
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
pub enum LoadError {
    #[error("config file not found: {}", path.display())]
    #[diagnostic(code(anchorcheck::load::not_found))]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {cause}", path.display())]
    #[diagnostic(code(anchorcheck::load::read))]
    Read { path: PathBuf, cause: std::io::Error },

    #[error("unsupported file format {extension:?} for {}", path.display())]
    #[diagnostic(
        code(anchorcheck::load::unsupported_format),
        help("configuration files must end in .toml or .json")
    )]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("{}: {reason}", path.display())]
    #[diagnostic(
        code(anchorcheck::load::malformed),
        help("a configuration file must start with top-level sections such as `contract` and `attestors`")
    )]
    Malformed {
        path: PathBuf,
        reason: MalformedDocument,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Read { path, .. }
            | LoadError::UnsupportedFormat { path, .. }
            | LoadError::Malformed { path, .. } => path,
            LoadError::Parse(err) => &err.path,
        }
    }
}

#[derive(Error, Debug, Diagnostic)]
#[error("failed to parse {} as {format}: {reason}", path.display())]
#[diagnostic(code(anchorcheck::load::parse))]
pub struct ParseError {
    pub path: PathBuf,
    pub format: Format,
    pub reason: String,

    #[source_code]
    src: NamedSource<String>,

    #[label("{}", self.reason)]
    span: Option<SourceSpan>,
}

impl ParseError {
    pub fn from_toml(path: &Path, content: &str, error: toml::de::Error) -> Self {
        let span = error.span().map(SourceSpan::from);
        Self::new(path, content, Format::Toml, error.message().trim().to_string(), span)
    }

    pub fn from_json(path: &Path, content: &str, error: serde_json::Error) -> Self {
        // serde_json reports line 0 when it has no position to offer
        let span = (error.line() > 0).then(|| {
            let offset = line_to_offset(content, error.line() - 1) + error.column().saturating_sub(1);
            SourceSpan::from(offset.min(content.len()))
        });
        Self::new(path, content, Format::Json, error.to_string(), span)
    }

    fn new(
        path: &Path,
        content: &str,
        format: Format,
        reason: String,
        span: Option<SourceSpan>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            format,
            reason,
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
        }
    }

    pub fn span(&self) -> Option<SourceSpan> {
        self.span
    }
}

/// Calculate byte offset from a zero-based line number
fn line_to_offset(source: &str, target_line: usize) -> usize {
    let mut current_line = 0;

    for (idx, ch) in source.char_indices() {
        if current_line == target_line {
            return idx;
        }

        if ch == '\n' {
            current_line += 1;
        }
    }

    // If we didn't find the line, return the end of the source
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("a.JSON")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.yaml")), None);
        assert_eq!(Format::from_path(Path::new("toml")), None);
    }

    #[test]
    fn test_line_to_offset() {
        let source = "one\ntwo\nthree";
        assert_eq!(line_to_offset(source, 0), 0);
        assert_eq!(line_to_offset(source, 1), 4);
        assert_eq!(line_to_offset(source, 2), 8);
        assert_eq!(line_to_offset(source, 9), source.len());
    }

    #[test]
    fn test_json_error_points_at_location() {
        let content = "{\n  \"contract\": ,\n}";
        let err = serde_json::from_str::<serde_json::Value>(content).unwrap_err();
        let parse = ParseError::from_json(Path::new("bad.json"), content, err);

        let span = parse.span().expect("json errors carry a position");
        // The label lands on the second line, where the value is missing
        assert!(span.offset() >= line_to_offset(content, 1));
        assert!(span.offset() < line_to_offset(content, 2));
        assert!(parse.to_string().starts_with("failed to parse bad.json as JSON"));
    }

    #[test]
    fn test_toml_error_has_span() {
        let content = "[contract]\nname = \n";
        let err = toml::from_str::<serde_json::Value>(content).unwrap_err();
        let parse = ParseError::from_toml(Path::new("bad.toml"), content, err);

        assert!(parse.span().is_some());
        assert_eq!(parse.format, Format::Toml);
    }
}

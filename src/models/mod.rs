pub mod diagnostic;
pub mod document;

// Re-export commonly used types
pub use diagnostic::{Diagnostic, Severity, ValidationResult};
pub use document::{Document, FieldIssue, Kind, MalformedDocument, Node};

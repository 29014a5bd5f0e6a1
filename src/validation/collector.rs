use std::fmt;

use crate::models::{Diagnostic, FieldIssue, Kind, Node, ValidationResult};

/// Accumulates diagnostics for one validation run
///
/// Message templates:
/// - `<path>: missing required field` / `missing required section`
/// - `<path>: expected <type>, found <type and value>`
/// - `<path>: <constraint>` (written by the section checks)
#[derive(Debug, Default)]
pub(crate) struct Collector {
    diagnostics: Vec<Diagnostic>,
}

impl Collector {
    pub fn error(&mut self, path: &str, detail: impl fmt::Display) {
        self.diagnostics.push(Diagnostic::error(path, detail));
    }

    pub fn warning(&mut self, path: &str, detail: impl fmt::Display) {
        self.diagnostics.push(Diagnostic::warning(path, detail));
    }

    /// Run a typed accessor, recording an error if the value is missing or
    /// has the wrong type
    pub fn require<'a, T>(
        &mut self,
        path: &str,
        node: Node<'a>,
        access: impl FnOnce(&Node<'a>) -> Result<T, FieldIssue>,
    ) -> Option<T> {
        match access(&node) {
            Ok(value) => Some(value),
            Err(issue) => {
                self.field_issue(path, &node, issue, "missing required field");
                None
            }
        }
    }

    /// Like [`Collector::require`] for a top-level table
    pub fn require_section<'a>(&mut self, path: &str, node: Node<'a>) -> Option<Node<'a>> {
        match node.expect_mapping() {
            Ok(_) => Some(node),
            Err(issue) => {
                self.field_issue(path, &node, issue, "missing required section");
                None
            }
        }
    }

    /// Record a type mismatch for a value that is known to be present
    pub fn wrong_type(&mut self, path: &str, node: &Node<'_>, expected: Kind) {
        self.error(path, format!("expected {expected}, found {}", node.describe()));
    }

    fn field_issue(&mut self, path: &str, node: &Node<'_>, issue: FieldIssue, missing: &str) {
        match issue {
            FieldIssue::Missing => self.error(path, missing),
            FieldIssue::WrongType { expected, .. } => self.wrong_type(path, node, expected),
        }
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult::new(self.diagnostics)
    }
}

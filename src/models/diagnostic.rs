use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// One reported problem. `message` always starts with `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn error(path: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::new(Severity::Error, path.into(), detail)
    }

    pub fn warning(path: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::new(Severity::Warning, path.into(), detail)
    }

    fn new(severity: Severity, path: String, detail: impl fmt::Display) -> Self {
        let message = format!("{path}: {detail}");
        Self {
            severity,
            path,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Outcome of validating one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// All diagnostics in discovery order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let errors: Vec<&Diagnostic> = self.errors().collect();
        let warnings: Vec<&Diagnostic> = self.warnings().collect();

        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &errors)?;
        state.serialize_field("warnings", &warnings)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_starts_with_path() {
        let d = Diagnostic::error("contract.name", "missing required field");
        assert_eq!(d.message, "contract.name: missing required field");
        assert_eq!(d.to_string(), "error: contract.name: missing required field");
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let result = ValidationResult::new(vec![
            Diagnostic::warning("sessions", "optional section not provided"),
            Diagnostic::warning("attestors.registry[0].role", "not a standard role"),
        ]);
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 2);
        assert_eq!(result.error_count(), 0);

        let result = ValidationResult::new(vec![Diagnostic::error("contract", "missing")]);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_serializes_split_lists() {
        let result = ValidationResult::new(vec![
            Diagnostic::error("contract", "missing required section"),
            Diagnostic::warning("sessions", "optional section not provided, using defaults"),
        ]);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"][0]["severity"], "error");
        assert_eq!(value["errors"][0]["path"], "contract");
        assert_eq!(
            value["warnings"][0]["message"],
            "sessions: optional section not provided, using defaults"
        );
    }
}

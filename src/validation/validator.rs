use serde_json::Value;
use tracing::debug;

use super::assets::check_assets;
use super::attestors::check_attestors;
use super::collector::Collector;
use super::contract::check_contract;
use super::sessions::check_sessions;
use crate::defaults::Catalog;
use crate::models::{Document, MalformedDocument, ValidationResult};

/// Runs every section check against a document and collects the results
///
/// Sections are checked in a fixed order (contract, attestors, sessions,
/// assets) and a failure in one never skips the others.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    catalog: Catalog,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn validate(&self, document: &Document) -> ValidationResult {
        let mut out = Collector::default();

        check_contract(document, &self.catalog, &mut out);
        check_attestors(document, &self.catalog, &mut out);
        check_sessions(document, &mut out);
        check_assets(document, &self.catalog, &mut out);

        let result = out.finish();
        debug!(
            errors = result.error_count(),
            warnings = result.warning_count(),
            "Validation finished"
        );
        result
    }

    /// Validate a raw tree, failing only when it cannot be traversed at all
    pub fn validate_value(&self, value: Value) -> Result<ValidationResult, MalformedDocument> {
        let document = Document::try_from(value)?;
        Ok(self.validate(&document))
    }
}

/// Validate with the built-in catalog
pub fn validate(document: &Document) -> ValidationResult {
    Validator::new().validate(document)
}

use miette::Diagnostic;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// Embed the built-in enumerations at compile time
const DEFAULT_CATALOG_YAML: &str = include_str!("catalog.yaml");

// Parse the default catalog once at startup
pub static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(|| {
    serde_yaml::from_str(DEFAULT_CATALOG_YAML)
        .expect("Failed to parse built-in catalog - this is a bug")
});

/// The enumerated values the validator checks membership against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub networks: Vec<String>,
    pub roles: Vec<String>,
    pub assets: Vec<String>,
    pub currencies: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

impl Catalog {
    pub fn is_network(&self, value: &str) -> bool {
        self.networks.iter().any(|n| n == value)
    }

    pub fn is_role(&self, value: &str) -> bool {
        self.roles.iter().any(|r| r == value)
    }

    pub fn is_asset(&self, value: &str) -> bool {
        self.assets.iter().any(|a| a == value)
    }

    pub fn is_currency(&self, value: &str) -> bool {
        self.currencies.iter().any(|c| c == value)
    }

    /// Built-in catalog extended with the lists found in `path`
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: CatalogOverrides =
            serde_yaml::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(merge_with_defaults(overrides))
    }
}

/// User-supplied additions. Any subset of the lists may be given; YAML and
/// JSON are both accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogOverrides {
    #[serde(default)]
    pub networks: Option<Vec<String>>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub assets: Option<Vec<String>>,
    #[serde(default)]
    pub currencies: Option<Vec<String>>,
}

#[derive(Error, Debug, Diagnostic)]
pub enum CatalogError {
    #[error("failed to read catalog file {}", path.display())]
    #[diagnostic(code(anchorcheck::catalog::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file {}", path.display())]
    #[diagnostic(
        code(anchorcheck::catalog::parse),
        help("expected a YAML or JSON mapping with any of: networks, roles, assets, currencies")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Merge user additions into the built-in catalog
/// Built-in values keep their position; new values are appended once
pub fn merge_with_defaults(overrides: CatalogOverrides) -> Catalog {
    let mut catalog = DEFAULT_CATALOG.clone();

    extend_unique(&mut catalog.networks, overrides.networks);
    extend_unique(&mut catalog.roles, overrides.roles);
    extend_unique(&mut catalog.assets, overrides.assets);
    extend_unique(&mut catalog.currencies, overrides.currencies);

    catalog
}

fn extend_unique(list: &mut Vec<String>, extra: Option<Vec<String>>) {
    for value in extra.into_iter().flatten() {
        if !list.contains(&value) {
            list.push(value);
        }
    }
}

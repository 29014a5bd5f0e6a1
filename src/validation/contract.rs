use tracing::debug;

use super::collector::Collector;
use super::rules::{self, NAME_LENGTH};
use crate::defaults::Catalog;
use crate::models::{Document, Node};

/// Validates the required `contract` section
pub(crate) fn check_contract(document: &Document, catalog: &Catalog, out: &mut Collector) {
    debug!("Checking contract section");

    let Some(contract) = out.require_section("contract", document.section("contract")) else {
        return;
    };

    if let Some(name) = out.require("contract.name", contract.get("name"), Node::expect_str) {
        let len = name.chars().count();
        if !NAME_LENGTH.contains(&len) {
            out.error(
                "contract.name",
                format!(
                    "must be {}-{} characters, got {len}",
                    NAME_LENGTH.start(),
                    NAME_LENGTH.end()
                ),
            );
        } else if !rules::is_valid_contract_name(name) {
            out.error(
                "contract.name",
                format!("must contain only lowercase letters, numbers, and hyphens, got {name:?}"),
            );
        }
    }

    if let Some(version) = out.require("contract.version", contract.get("version"), Node::expect_str)
        && !rules::is_valid_version(version)
    {
        out.error(
            "contract.version",
            format!("must follow semantic versioning MAJOR.MINOR.PATCH (e.g. 1.0.0), got {version:?}"),
        );
    }

    if let Some(network) = out.require("contract.network", contract.get("network"), Node::expect_str)
        && !catalog.is_network(network)
    {
        out.error(
            "contract.network",
            format!(
                "must be one of: {}, got {network:?}",
                catalog.networks.join(", ")
            ),
        );
    }
}

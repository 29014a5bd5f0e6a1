//! Advisory checks for asset symbols and currency codes
//!
//! Both sections are optional and nothing here is ever an error: unknown
//! values and unexpected shapes are reported as warnings and skipped.

use tracing::debug;

use super::collector::Collector;
use crate::defaults::Catalog;
use crate::models::{Document, Kind, Node};

pub(crate) fn check_assets(document: &Document, catalog: &Catalog, out: &mut Collector) {
    debug!("Checking asset and currency references");

    check_collateral(document.section("stablecoin"), catalog, out);
    check_currencies(document.section("compliance"), catalog, out);
}

fn check_collateral(stablecoin: Node<'_>, catalog: &Catalog, out: &mut Collector) {
    let Some(collateral) = optional_list(out, "stablecoin", stablecoin, "collateral_types") else {
        return;
    };

    for (idx, item) in collateral.items().enumerate() {
        let item_path = format!("stablecoin.collateral_types[{idx}]");
        if !matches!(item, Node::Mapping(_)) {
            skip_unexpected(out, &item_path, &item, Kind::Mapping);
            continue;
        }

        let symbol_path = format!("{item_path}.symbol");
        match item.get("symbol") {
            Node::String(symbol) if !symbol.is_empty() && !catalog.is_asset(symbol) => {
                out.warning(&symbol_path, format!("{symbol:?} is not a standard asset"));
            }
            Node::String(_) => {}
            missing if missing.is_missing() => {}
            other => skip_unexpected(out, &symbol_path, &other, Kind::String),
        }
    }
}

fn check_currencies(compliance: Node<'_>, catalog: &Catalog, out: &mut Collector) {
    let Some(currencies) =
        optional_list(out, "compliance", compliance, "supported_currencies")
    else {
        return;
    };

    for (idx, item) in currencies.items().enumerate() {
        let path = format!("compliance.supported_currencies[{idx}]");
        match item {
            Node::String(code) if !catalog.is_currency(code) => {
                out.warning(&path, format!("{code:?} is not a supported currency"));
            }
            Node::String(_) => {}
            other => skip_unexpected(out, &path, &other, Kind::String),
        }
    }
}

/// `section.key` as a list, or `None` when either level is absent or the
/// shape is unexpected (the latter with a warning)
fn optional_list<'a>(
    out: &mut Collector,
    section_path: &str,
    section: Node<'a>,
    key: &str,
) -> Option<Node<'a>> {
    if section.is_missing() {
        return None;
    }
    if !matches!(section, Node::Mapping(_)) {
        skip_unexpected(out, section_path, &section, Kind::Mapping);
        return None;
    }

    let list = section.get(key);
    if list.is_missing() {
        return None;
    }
    if !matches!(list, Node::Sequence(_)) {
        skip_unexpected(out, &format!("{section_path}.{key}"), &list, Kind::Sequence);
        return None;
    }
    Some(list)
}

fn skip_unexpected(out: &mut Collector, path: &str, node: &Node<'_>, expected: Kind) {
    out.warning(
        path,
        format!("expected {expected}, found {}; skipping", node.describe()),
    );
}

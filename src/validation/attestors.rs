use std::collections::HashMap;
use tracing::debug;

use super::collector::Collector;
use super::rules::{self, MAX_ATTESTORS, NAME_LENGTH};
use crate::defaults::Catalog;
use crate::models::{Document, Kind, Node};

const REGISTRY: &str = "attestors.registry";

/// Validates `attestors.registry`: every entry on its own, then identity
/// uniqueness and the presence of an enabled attestor
pub(crate) fn check_attestors(document: &Document, catalog: &Catalog, out: &mut Collector) {
    debug!("Checking attestors section");

    let Some(attestors) = out.require_section("attestors", document.section("attestors")) else {
        return;
    };
    let Some(registry) = out.require(REGISTRY, attestors.get("registry"), Node::expect_sequence)
    else {
        return;
    };

    if registry.is_empty() {
        out.error(REGISTRY, "registry cannot be empty");
        return;
    }
    if registry.len() > MAX_ATTESTORS {
        out.error(
            REGISTRY,
            format!(
                "cannot exceed {MAX_ATTESTORS} attestors, got {}",
                registry.len()
            ),
        );
    }

    let mut names = DuplicateTracker::default();
    let mut addresses = DuplicateTracker::default();
    let mut any_enabled = false;

    for (idx, value) in registry.iter().enumerate() {
        let path = format!("{REGISTRY}[{idx}]");
        let entry = Node::from(value);
        if !matches!(entry, Node::Mapping(_)) {
            out.wrong_type(&path, &entry, Kind::Mapping);
            continue;
        }

        let identity = check_entry(entry, &path, catalog, out);
        if let Some(name) = identity.name {
            names.record(name, idx);
        }
        if let Some(address) = identity.address {
            addresses.record(address, idx);
        }
        any_enabled |= identity.enabled;
    }

    debug!(
        entries = registry.len(),
        any_enabled, "Checked attestor entries"
    );

    names.report(out, "name");
    addresses.report(out, "address");

    if !any_enabled {
        out.error(
            REGISTRY,
            "at least one attestor must be enabled (set `enabled = true`)",
        );
    }
}

/// What later registry-wide checks need from one entry
struct Identity<'a> {
    name: Option<&'a str>,
    address: Option<&'a str>,
    enabled: bool,
}

fn check_entry<'a>(
    entry: Node<'a>,
    path: &str,
    catalog: &Catalog,
    out: &mut Collector,
) -> Identity<'a> {
    let name_path = format!("{path}.name");
    let name = out.require(&name_path, entry.get("name"), Node::expect_str);
    if let Some(name) = name {
        let len = name.chars().count();
        if !NAME_LENGTH.contains(&len) {
            out.error(
                &name_path,
                format!(
                    "must be {}-{} characters, got {len}",
                    NAME_LENGTH.start(),
                    NAME_LENGTH.end()
                ),
            );
        }
    }

    let address_path = format!("{path}.address");
    let address = out.require(&address_path, entry.get("address"), Node::expect_str);
    if let Some(address) = address
        && let Err(problem) = rules::check_address(address)
    {
        out.error(
            &address_path,
            format!("is not a valid Stellar address: {problem}"),
        );
    }

    let endpoint = entry.get("endpoint");
    if !endpoint.is_missing() {
        let endpoint_path = format!("{path}.endpoint");
        if let Some(url) = out.require(&endpoint_path, endpoint, Node::expect_str)
            && let Err(problem) = rules::check_url(url)
        {
            out.error(&endpoint_path, format!("is not a valid URL: {problem}"));
        }
    }

    let role_path = format!("{path}.role");
    if let Some(role) = out.require(&role_path, entry.get("role"), Node::expect_str)
        && !catalog.is_role(role)
    {
        out.warning(&role_path, format!("{role:?} is not a standard role"));
    }

    let enabled = match entry.get("enabled") {
        Node::Boolean(flag) => flag,
        missing if missing.is_missing() => false,
        other => {
            out.wrong_type(&format!("{path}.enabled"), &other, Kind::Boolean);
            false
        }
    };

    Identity {
        name: name.filter(|n| !n.is_empty()),
        address: address.filter(|a| !a.is_empty()),
        enabled,
    }
}

/// Remembers every index a value was seen at, in first-seen order
#[derive(Default)]
struct DuplicateTracker<'a> {
    order: Vec<&'a str>,
    seen: HashMap<&'a str, Vec<usize>>,
}

impl<'a> DuplicateTracker<'a> {
    fn record(&mut self, value: &'a str, idx: usize) {
        let indices = self.seen.entry(value).or_default();
        if indices.is_empty() {
            self.order.push(value);
        }
        indices.push(idx);
    }

    /// One error per duplicated value
    fn report(&self, out: &mut Collector, field: &str) {
        for value in &self.order {
            let indices = &self.seen[value];
            if indices.len() > 1 {
                let listed: Vec<String> = indices.iter().map(usize::to_string).collect();
                out.error(
                    REGISTRY,
                    format!(
                        "duplicate attestor {field} {value:?} (entries {})",
                        listed.join(", ")
                    ),
                );
            }
        }
    }
}

use std::ops::RangeInclusive;
use tracing::debug;

use super::collector::Collector;
use super::rules::{OPERATIONS_PER_SESSION, SESSION_TIMEOUT_SECONDS};
use crate::models::{Document, Node};

/// Validates the optional `sessions` section
pub(crate) fn check_sessions(document: &Document, out: &mut Collector) {
    debug!("Checking sessions section");

    let sessions = document.section("sessions");
    if sessions.is_missing() {
        out.warning("sessions", "optional section not provided, using defaults");
        return;
    }
    let Some(sessions) = out.require_section("sessions", sessions) else {
        return;
    };

    check_bounded(
        out,
        "sessions.session_timeout_seconds",
        sessions.get("session_timeout_seconds"),
        SESSION_TIMEOUT_SECONDS,
    );
    check_bounded(
        out,
        "sessions.operations_per_session",
        sessions.get("operations_per_session"),
        OPERATIONS_PER_SESSION,
    );
}

fn check_bounded(out: &mut Collector, path: &str, node: Node<'_>, bounds: RangeInclusive<i128>) {
    if node.is_missing() {
        return;
    }
    let Some(value) = out.require(path, node, Node::expect_integer) else {
        return;
    };

    if value < *bounds.start() {
        out.error(path, format!("must be at least {}, got {value}", bounds.start()));
    } else if value > *bounds.end() {
        out.error(path, format!("cannot exceed {}, got {value}", bounds.end()));
    }
}

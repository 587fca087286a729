// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pure trigger evaluation
//!
//! A poll window (previous tick, current tick] turns event boundaries
//! into start/end edges; these functions decide which triggers those
//! edges and the snapshot delta satisfy.

use cw_core::{CalendarEvent, FiringKind, TimeWindow};
use cw_rules::{ChangeTrigger, EventTrigger};

/// The boundary crossings an event makes within a poll window.
///
/// Start is reported before End when both boundaries fall in the same
/// window (zero-duration events cross both at once).
pub fn edges_in_window(event: &CalendarEvent, window: TimeWindow) -> Vec<FiringKind> {
    let mut edges = Vec::new();
    if window.contains(event.start) {
        edges.push(FiringKind::Start);
    }
    if window.contains(event.end) {
        edges.push(FiringKind::End);
    }
    edges
}

/// Whether an event trigger fires for this event on this edge
pub fn event_trigger_matches(
    trigger: &EventTrigger,
    event: &CalendarEvent,
    kind: FiringKind,
) -> bool {
    trigger.wants_edge(kind)
        && trigger.wants_duration_class(event)
        && trigger.filter.matches(event)
}

/// Whether a change trigger fires for this delta row
pub fn change_trigger_matches(
    trigger: &ChangeTrigger,
    event: &CalendarEvent,
    kind: FiringKind,
) -> bool {
    trigger.wants_kind(kind) && trigger.filter.matches(event)
}

#[cfg(test)]
#[path = "evaluate_tests.rs"]
mod tests;

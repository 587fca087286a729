// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delta partitions between consecutive calendar snapshots

use crate::event::CalendarEvent;
use crate::firing::FiringKind;
use serde::{Deserialize, Serialize};

/// A changed event: the same identity observed with different content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedEvent {
    pub prior: CalendarEvent,
    pub current: CalendarEvent,
}

/// The inserted/removed/changed partition between two snapshots of one
/// calendar.
///
/// `removed` carries the prior snapshot's data, since removed events
/// are no longer readable from the source. Unchanged events are never
/// reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub inserted: Vec<CalendarEvent>,
    pub removed: Vec<CalendarEvent>,
    pub changed: Vec<ChangedEvent>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inserted.len() + self.removed.len() + self.changed.len()
    }

    /// Iterate delta rows in removed, inserted, changed order.
    ///
    /// Yields the event that filter predicates apply to: the current
    /// event, or the last-known event for removals.
    pub fn entries(&self) -> impl Iterator<Item = (FiringKind, &CalendarEvent)> {
        let removed = self.removed.iter().map(|ev| (FiringKind::Removed, ev));
        let inserted = self.inserted.iter().map(|ev| (FiringKind::Inserted, ev));
        let changed = self
            .changed
            .iter()
            .map(|ch| (FiringKind::Changed, &ch.current));
        removed.chain(inserted).chain(changed)
    }
}

#[cfg(test)]
#[path = "delta_tests.rs"]
mod tests;

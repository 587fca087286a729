// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-calendar event snapshots and diffing
//!
//! The store keeps the last observed event set for each calendar. A
//! calendar's first observation primes its snapshot and reports no
//! changes, so startup never produces an insertion storm.

use cw_core::{CalendarEvent, ChangedEvent, Delta, EventKey};
use std::collections::HashMap;

/// Last observed event sets, keyed by calendar id
#[derive(Debug, Default)]
pub struct SnapshotStore {
    calendars: HashMap<String, HashMap<EventKey, CalendarEvent>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a calendar has been observed at least once
    pub fn is_primed(&self, calendar: &str) -> bool {
        self.calendars.contains_key(calendar)
    }

    /// All calendars with a snapshot, sorted
    pub fn known_calendars(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.calendars.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Drop a calendar's snapshot. Returns whether one existed.
    pub fn remove_calendar(&mut self, calendar: &str) -> bool {
        self.calendars.remove(calendar).is_some()
    }

    /// Replace a calendar's snapshot with a fresh observation and
    /// return what changed since the prior one.
    ///
    /// The first observation of a calendar primes the snapshot and
    /// returns an empty delta. Rows within each delta bucket are
    /// ordered by start time, uid breaking ties.
    pub fn update(&mut self, calendar: &str, events: Vec<CalendarEvent>) -> Delta {
        let next: HashMap<EventKey, CalendarEvent> =
            events.into_iter().map(|ev| (ev.key(), ev)).collect();

        let Some(prior) = self.calendars.get(calendar) else {
            self.calendars.insert(calendar.to_string(), next);
            return Delta::default();
        };

        let mut delta = Delta::default();
        for (key, ev) in &next {
            match prior.get(key) {
                None => delta.inserted.push(ev.clone()),
                Some(old) if old != ev => delta.changed.push(ChangedEvent {
                    prior: old.clone(),
                    current: ev.clone(),
                }),
                Some(_) => {}
            }
        }
        for (key, old) in prior {
            if !next.contains_key(key) {
                delta.removed.push(old.clone());
            }
        }

        delta
            .inserted
            .sort_by(|a, b| (a.start, &a.uid).cmp(&(b.start, &b.uid)));
        delta
            .removed
            .sort_by(|a, b| (a.start, &a.uid).cmp(&(b.start, &b.uid)));
        delta.changed.sort_by(|a, b| {
            (a.current.start, &a.current.uid).cmp(&(b.current.start, &b.current.uid))
        });

        self.calendars.insert(calendar.to_string(), next);
        delta
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

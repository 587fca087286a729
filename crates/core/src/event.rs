// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar event values and their identity keys

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A calendar known to the calendar source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub id: String,
    pub name: String,
}

/// One event instance as read from a calendar at one poll.
///
/// Values are immutable once constructed; a fresh set is read each
/// poll cycle. Two instances with the same [`EventKey`] may differ in
/// content across polls, which the snapshot store reports as "changed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Store-assigned event uid (shared by all instances of a series)
    pub uid: String,
    /// Id of the calendar this event was read from
    pub calendar: String,
    /// Original start of this recurrence instance; None for
    /// non-repeating events
    pub occurrence: Option<DateTime<Utc>>,
    pub title: String,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
}

impl CalendarEvent {
    /// Stable identity of this event instance across polls.
    ///
    /// Keyed by calendar id + uid + occurrence stamp: an event moved to
    /// another calendar diffs as removed + inserted, and repeating
    /// instances stay distinct even when the store reuses the uid.
    pub fn key(&self) -> EventKey {
        EventKey {
            calendar: self.calendar.clone(),
            uid: self.uid.clone(),
            occurrence: self.occurrence,
        }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Events under 24 hours belong to the "hourly" duration class
    pub fn is_hourly(&self) -> bool {
        !self.all_day && self.duration() < chrono::Duration::hours(24)
    }
}

/// Stable identity of one physical event occurrence
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventKey {
    pub calendar: String,
    pub uid: String,
    pub occurrence: Option<DateTime<Utc>>,
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.occurrence {
            Some(occ) => write!(f, "{}/{}@{}", self.calendar, self.uid, occ.to_rfc3339()),
            None => write!(f, "{}/{}", self.calendar, self.uid),
        }
    }
}

/// A half-open time range `(start, end]`, unbounded when `end` is None.
///
/// Doubles as the read range handed to calendar sources and as the
/// just-elapsed window a poll cycle evaluates start/end crossings
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn since(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    /// Whether an instant falls inside the window
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t > self.start && self.end.map_or(true, |end| t <= end)
    }

    /// Whether a span overlaps the window
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        end > self.start && self.end.map_or(true, |wend| start <= wend)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Trigger rule definitions

use crate::pattern::Pattern;
use cw_core::{CalendarEvent, FiringKind};

/// Filter components shared by both trigger types.
///
/// All present components must match; an absent component matches
/// everything.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    /// Rule name, used as the trigger id in firings
    pub name: String,
    pub title: Option<Pattern>,
    pub notes: Option<Pattern>,
    pub location: Option<Pattern>,
    /// Exact calendar id to match; None matches all calendars
    pub calendar: Option<String>,
}

impl EventFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            notes: None,
            location: None,
            calendar: None,
        }
    }

    pub fn matches(&self, event: &CalendarEvent) -> bool {
        if let Some(calendar) = &self.calendar {
            if *calendar != event.calendar {
                return false;
            }
        }
        if let Some(title) = &self.title {
            if !title.matches(&event.title) {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !location.matches_opt(event.location.as_deref()) {
                return false;
            }
        }
        if let Some(notes) = &self.notes {
            if !notes.matches_opt(event.notes.as_deref()) {
                return false;
            }
        }
        true
    }
}

/// A rule matching individual events by state: start/end crossings and
/// duration class ("calevent").
#[derive(Debug, Clone, PartialEq)]
pub struct EventTrigger {
    pub filter: EventFilter,
    pub match_start: bool,
    pub match_end: bool,
    pub match_hourly: bool,
    pub match_allday: bool,
    /// Run the event's notes text as a script when the trigger fires
    pub execute_notes: bool,
}

impl EventTrigger {
    pub fn new(filter: EventFilter) -> Self {
        Self {
            filter,
            match_start: true,
            match_end: true,
            match_hourly: true,
            match_allday: true,
            execute_notes: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.filter.name
    }

    /// Whether the start/end flag for this crossing kind is set
    pub fn wants_edge(&self, kind: FiringKind) -> bool {
        match kind {
            FiringKind::Start => self.match_start,
            FiringKind::End => self.match_end,
            _ => false,
        }
    }

    /// Whether the event's duration class is accepted.
    ///
    /// Both class flags false is a degenerate always-false trigger.
    pub fn wants_duration_class(&self, event: &CalendarEvent) -> bool {
        if event.all_day {
            self.match_allday
        } else {
            event.is_hourly() && self.match_hourly
        }
    }
}

/// A rule matching detected changes between polls ("calchange")
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeTrigger {
    pub filter: EventFilter,
    pub match_inserted: bool,
    pub match_removed: bool,
    pub match_changed: bool,
}

impl ChangeTrigger {
    pub fn new(filter: EventFilter) -> Self {
        Self {
            filter,
            match_inserted: true,
            match_removed: true,
            match_changed: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.filter.name
    }

    pub fn wants_kind(&self, kind: FiringKind) -> bool {
        match kind {
            FiringKind::Inserted => self.match_inserted,
            FiringKind::Removed => self.match_removed,
            FiringKind::Changed => self.match_changed,
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;

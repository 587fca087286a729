// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake calendar source for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CalendarError, CalendarSource};
use async_trait::async_trait;
use cw_core::{CalendarEvent, CalendarInfo, TimeWindow};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded calendar call
#[derive(Debug, Clone)]
pub enum CalendarCall {
    ListCalendars,
    ReadEvents { calendar_id: String, window: TimeWindow },
}

/// Fake calendar source with scripted contents and injectable failures
#[derive(Clone, Default)]
pub struct FakeCalendarSource {
    calendars: Arc<Mutex<HashMap<String, Vec<CalendarEvent>>>>,
    fail_reads: Arc<Mutex<HashMap<String, u32>>>,
    fail_list: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<CalendarCall>>>,
}

impl FakeCalendarSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the event set of a calendar (creating it if needed)
    pub fn set_events(&self, calendar_id: &str, events: Vec<CalendarEvent>) {
        self.calendars
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(calendar_id.to_string(), events);
    }

    /// Remove a calendar entirely
    pub fn remove_calendar(&self, calendar_id: &str) {
        self.calendars
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(calendar_id);
    }

    /// Make the next `count` reads of a calendar fail
    pub fn fail_next_reads(&self, calendar_id: &str, count: u32) {
        self.fail_reads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(calendar_id.to_string(), count);
    }

    /// Make `list_calendars` fail until reset
    pub fn set_list_failing(&self, failing: bool) {
        *self.fail_list.lock().unwrap_or_else(|e| e.into_inner()) = failing;
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<CalendarCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: CalendarCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

#[async_trait]
impl CalendarSource for FakeCalendarSource {
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, CalendarError> {
        self.record(CalendarCall::ListCalendars);
        if *self.fail_list.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(CalendarError::Unavailable("fake list failure".to_string()));
        }
        let mut infos: Vec<CalendarInfo> = self
            .calendars
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .map(|id| CalendarInfo {
                id: id.clone(),
                name: id.clone(),
            })
            .collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(infos)
    }

    async fn read_events(
        &self,
        calendar_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        self.record(CalendarCall::ReadEvents {
            calendar_id: calendar_id.to_string(),
            window,
        });

        {
            let mut failures = self.fail_reads.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(remaining) = failures.get_mut(calendar_id) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(CalendarError::Unavailable(format!(
                        "fake read failure for {}",
                        calendar_id
                    )));
                }
            }
        }

        let calendars = self.calendars.lock().unwrap_or_else(|e| e.into_inner());
        let events = calendars
            .get(calendar_id)
            .ok_or_else(|| CalendarError::CalendarNotFound(calendar_id.to_string()))?;
        Ok(events
            .iter()
            .filter(|ev| window.overlaps(ev.start, ev.end))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

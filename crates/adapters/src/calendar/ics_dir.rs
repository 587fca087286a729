// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-backed calendar source
//!
//! Each subdirectory of the root is one calendar (the directory name
//! is the calendar id); every `.ics` file inside it contributes its
//! VEVENT components. Files that fail to parse are skipped with a
//! warning so one broken export cannot take the whole calendar down.

use super::{CalendarError, CalendarSource};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use cw_core::{CalendarEvent, CalendarInfo, TimeWindow};
use icalendar::parser::{read_calendar, unfold, Component};
use icalendar::{CalendarDateTime, DatePerhapsTime};
use std::path::PathBuf;

/// Calendar source reading `.ics` files from a directory tree
#[derive(Debug, Clone)]
pub struct IcsDirSource {
    root: PathBuf,
}

impl IcsDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl CalendarSource for IcsDirSource {
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, CalendarError> {
        if !self.root.is_dir() {
            return Err(CalendarError::Unavailable(format!(
                "calendar root is not a directory: {}",
                self.root.display()
            )));
        }
        let mut calendars = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            calendars.push(CalendarInfo {
                id: name.clone(),
                name,
            });
        }
        calendars.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(calendars)
    }

    async fn read_events(
        &self,
        calendar_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let dir = self.root.join(calendar_id);
        if !dir.is_dir() {
            return Err(CalendarError::CalendarNotFound(calendar_id.to_string()));
        }

        let mut events = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("ics") {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            match parse_ics_events(&content, calendar_id) {
                Ok(parsed) => events.extend(parsed),
                Err(message) => {
                    tracing::warn!(path = %path.display(), message, "skipping unparseable ics file");
                }
            }
        }

        events.retain(|ev| window.overlaps(ev.start, ev.end));
        events.sort_by(|a, b| (a.start, &a.uid).cmp(&(b.start, &b.uid)));
        Ok(events)
    }
}

/// Parse every VEVENT in one ics document
fn parse_ics_events(content: &str, calendar_id: &str) -> Result<Vec<CalendarEvent>, String> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| e.to_string())?;

    let mut events = Vec::new();
    for component in &calendar.components {
        if component.name != "VEVENT" {
            continue;
        }
        match parse_vevent(component, calendar_id) {
            Some(event) => events.push(event),
            None => tracing::warn!(calendar = calendar_id, "skipping VEVENT without UID/DTSTART"),
        }
    }
    Ok(events)
}

fn parse_vevent(vevent: &Component, calendar_id: &str) -> Option<CalendarEvent> {
    let uid = vevent.find_prop("UID")?.val.to_string();
    let (start, start_is_date) = to_utc(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);

    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(|dpt| to_utc(dpt).0);
    // DTEND is optional: all-day events default to one day, timed ones
    // to a point in time
    let end = end.unwrap_or_else(|| {
        if start_is_date {
            start + Duration::days(1)
        } else {
            start
        }
    });

    let occurrence = vevent
        .find_prop("RECURRENCE-ID")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(|dpt| to_utc(dpt).0);

    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(untitled)".to_string());

    Some(CalendarEvent {
        uid,
        calendar: calendar_id.to_string(),
        occurrence,
        title,
        notes: vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string()),
        location: vevent.find_prop("LOCATION").map(|p| p.val.to_string()),
        start,
        end,
        all_day: start_is_date,
    })
}

/// Flatten icalendar's date-or-datetime to UTC; the bool marks a pure
/// date (all-day)
fn to_utc(dpt: DatePerhapsTime) -> (DateTime<Utc>, bool) {
    match dpt {
        DatePerhapsTime::Date(d) => (d.and_time(chrono::NaiveTime::MIN).and_utc(), true),
        DatePerhapsTime::DateTime(dt) => match dt {
            CalendarDateTime::Utc(dt) => (dt, false),
            CalendarDateTime::Floating(naive) => (naive.and_utc(), false),
            // Zoned times are treated as UTC; the engine compares
            // instants, not local renderings
            CalendarDateTime::WithTimezone { date_time, .. } => (date_time.and_utc(), false),
        },
    }
}

#[cfg(test)]
#[path = "ics_dir_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op calendar source

use super::{CalendarError, CalendarSource};
use async_trait::async_trait;
use cw_core::{CalendarEvent, CalendarInfo, TimeWindow};

/// Calendar source with no calendars; useful as a placeholder
#[derive(Debug, Clone, Default)]
pub struct NoOpCalendarSource;

#[async_trait]
impl CalendarSource for NoOpCalendarSource {
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, CalendarError> {
        Ok(Vec::new())
    }

    async fn read_events(
        &self,
        calendar_id: &str,
        _window: TimeWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        Err(CalendarError::CalendarNotFound(calendar_id.to_string()))
    }
}

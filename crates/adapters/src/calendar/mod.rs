// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Calendar source adapters

mod ics_dir;
mod noop;

pub use ics_dir::IcsDirSource;
pub use noop::NoOpCalendarSource;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{CalendarCall, FakeCalendarSource};

use async_trait::async_trait;
use cw_core::{CalendarEvent, CalendarInfo, TimeWindow};
use thiserror::Error;

/// Errors from calendar reads
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("calendar source unavailable: {0}")]
    Unavailable(String),
    #[error("calendar not found: {0}")]
    CalendarNotFound(String),
    #[error("event parse error in {path}: {message}")]
    Parse { path: String, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only adapter over a calendar store.
///
/// The engine never writes to a calendar through this interface.
#[async_trait]
pub trait CalendarSource: Clone + Send + Sync + 'static {
    /// Enumerate the calendars this source knows about
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, CalendarError>;

    /// Read all events of one calendar whose span overlaps the window
    async fn read_events(
        &self,
        calendar_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarError>;
}

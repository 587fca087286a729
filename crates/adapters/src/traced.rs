// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::calendar::{CalendarError, CalendarSource};
use crate::host::{HostDispatch, HostError};
use async_trait::async_trait;
use cw_core::{CalendarEvent, CalendarInfo, Firing, TimeWindow};

/// Wrapper that adds tracing to any CalendarSource
#[derive(Clone)]
pub struct TracedCalendarSource<S> {
    inner: S,
}

impl<S> TracedCalendarSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: CalendarSource> CalendarSource for TracedCalendarSource<S> {
    async fn list_calendars(&self) -> Result<Vec<CalendarInfo>, CalendarError> {
        let span = tracing::info_span!("calendar.list");
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.list_calendars().await;
        let elapsed = start.elapsed();

        match &result {
            Ok(calendars) => tracing::debug!(
                count = calendars.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "listed calendars"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "list failed"
            ),
        }

        result
    }

    async fn read_events(
        &self,
        calendar_id: &str,
        window: TimeWindow,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let span = tracing::info_span!("calendar.read", calendar = calendar_id);
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.read_events(calendar_id, window).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(events) => tracing::debug!(
                count = events.len(),
                elapsed_ms = elapsed.as_millis() as u64,
                "read events"
            ),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "read failed"
            ),
        }

        result
    }
}

/// Wrapper that adds tracing to any HostDispatch
#[derive(Clone)]
pub struct TracedHostDispatch<H> {
    inner: H,
}

impl<H> TracedHostDispatch<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<H: HostDispatch> HostDispatch for TracedHostDispatch<H> {
    async fn fire(&self, firing: &Firing) -> Result<(), HostError> {
        let span = tracing::info_span!(
            "host.fire",
            trigger = %firing.trigger,
            kind = %firing.kind
        );
        let _guard = span.enter();

        let start = std::time::Instant::now();
        let result = self.inner.fire(firing).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(
                firing_id = %firing.id,
                event = %firing.event.key(),
                elapsed_ms = elapsed.as_millis() as u64,
                "fired"
            ),
            Err(e) => tracing::error!(
                firing_id = %firing.id,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "fire failed"
            ),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

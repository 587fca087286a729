// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The poll cycle
//!
//! One cycle advances the poll window to the current tick, reads every
//! monitored calendar, diffs against the snapshots, and dispatches the
//! satisfied change and event triggers. A cycle never fails; per
//! calendar problems are reported and that calendar is skipped with
//! its snapshot intact.

use crate::dispatch::Dispatcher;
use crate::error::EngineError;
use crate::evaluate::{change_trigger_matches, edges_in_window, event_trigger_matches};
use crate::snapshot::SnapshotStore;
use chrono::DateTime;
use chrono::Utc;
use cw_adapters::calendar::CalendarSource;
use cw_adapters::host::HostDispatch;
use cw_adapters::script::ScriptRunner;
use cw_core::{CalendarEvent, Clock, Firing, IdGen, TimeWindow};
use cw_rules::{RuleSet, RuleSetHandle};
use std::sync::Arc;
use std::time::Duration;

/// Poll loop settings
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Calendars to monitor; None derives the set from the rules, or
    /// from the source when no rule is calendar-scoped
    pub calendars: Option<Vec<String>>,
    pub read_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            calendars: None,
            read_timeout: Duration::from_secs(30),
        }
    }
}

/// What one poll cycle did
#[derive(Debug, Default)]
pub struct CycleReport {
    pub window: Option<TimeWindow>,
    pub firings: Vec<Firing>,
    /// Calendars skipped this cycle because their read failed
    pub skipped: Vec<String>,
    pub errors: Vec<EngineError>,
}

/// Calendar poll loop state
pub struct Poller<C, H, S, I, K> {
    source: C,
    dispatcher: Dispatcher<H, S, I>,
    clock: K,
    rules_handle: RuleSetHandle,
    rules: Arc<RuleSet>,
    snapshots: SnapshotStore,
    last_poll: Option<DateTime<Utc>>,
    config: PollerConfig,
}

impl<C, H, S, I, K> Poller<C, H, S, I, K>
where
    C: CalendarSource,
    H: HostDispatch,
    S: ScriptRunner,
    I: IdGen,
    K: Clock,
{
    pub fn new(
        source: C,
        dispatcher: Dispatcher<H, S, I>,
        clock: K,
        rules_handle: RuleSetHandle,
        config: PollerConfig,
    ) -> Self {
        let rules = rules_handle
            .take_pending()
            .unwrap_or_else(|| Arc::new(RuleSet::default()));
        Self {
            source,
            dispatcher,
            clock,
            rules_handle,
            rules,
            snapshots: SnapshotStore::new(),
            last_poll: None,
            config,
        }
    }

    /// The rule set the next cycle will evaluate
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Run one poll cycle. Infallible; problems are reported in the
    /// returned cycle report.
    pub async fn run_cycle(&mut self) -> CycleReport {
        if let Some(rules) = self.rules_handle.take_pending() {
            tracing::info!(
                events = rules.events.len(),
                changes = rules.changes.len(),
                "rule set replaced"
            );
            self.rules = rules;
        }

        let now = self.clock.now();
        let mut report = CycleReport::default();

        // First cycle has no prior tick: the empty window (now, now]
        // crosses nothing and only primes the snapshots.
        let window = TimeWindow::new(self.last_poll.unwrap_or(now), now);
        report.window = Some(window);

        let monitored = self.monitored_calendars(&mut report).await;
        for stale in self.snapshots.known_calendars() {
            if !monitored.contains(&stale) {
                self.snapshots.remove_calendar(&stale);
                tracing::debug!(calendar = %stale, "dropped snapshot for unmonitored calendar");
            }
        }

        for calendar in &monitored {
            // Read everything from the window start onward so future
            // events are snapshotted for change detection.
            let read_window = TimeWindow::since(window.start);
            let events = match tokio::time::timeout(
                self.config.read_timeout,
                self.source.read_events(calendar, read_window),
            )
            .await
            {
                Ok(Ok(events)) => events,
                Ok(Err(e)) => {
                    report.errors.push(EngineError::CalendarRead {
                        calendar: calendar.clone(),
                        source: e,
                    });
                    report.skipped.push(calendar.clone());
                    continue;
                }
                Err(_) => {
                    report.errors.push(EngineError::ReadTimeout {
                        calendar: calendar.clone(),
                        timeout_secs: self.config.read_timeout.as_secs(),
                    });
                    report.skipped.push(calendar.clone());
                    continue;
                }
            };

            let delta = self.snapshots.update(calendar, events.clone());
            self.fire_change_triggers(&delta, &mut report).await;
            self.fire_event_triggers(&events, window, &mut report).await;
        }

        self.last_poll = Some(now);
        tracing::debug!(
            calendars = monitored.len(),
            firings = report.firings.len(),
            skipped = report.skipped.len(),
            errors = report.errors.len(),
            "cycle complete"
        );
        report
    }

    /// Resolve the calendars this cycle watches: explicit config, then
    /// the rules' calendar scopes, then source discovery. If discovery
    /// fails the previously observed set keeps the cycle going.
    async fn monitored_calendars(&mut self, report: &mut CycleReport) -> Vec<String> {
        if let Some(ids) = &self.config.calendars {
            return dedup_sorted(ids.clone());
        }
        if let Some(ids) = self.rules.selected_calendars() {
            return dedup_sorted(ids);
        }
        match self.source.list_calendars().await {
            Ok(infos) => dedup_sorted(infos.into_iter().map(|c| c.id).collect()),
            Err(e) => {
                report.errors.push(EngineError::ListCalendars(e));
                self.snapshots.known_calendars()
            }
        }
    }

    async fn fire_change_triggers(&self, delta: &cw_core::Delta, report: &mut CycleReport) {
        for (kind, event) in delta.entries() {
            for trigger in &self.rules.changes {
                if change_trigger_matches(trigger, event, kind) {
                    let out = self
                        .dispatcher
                        .dispatch(trigger.name(), kind, event, false)
                        .await;
                    report.firings.push(out.firing);
                    report.errors.extend(out.errors);
                }
            }
        }
    }

    async fn fire_event_triggers(
        &self,
        events: &[CalendarEvent],
        window: TimeWindow,
        report: &mut CycleReport,
    ) {
        for event in events {
            for kind in edges_in_window(event, window) {
                for trigger in &self.rules.events {
                    if event_trigger_matches(trigger, event, kind) {
                        let out = self
                            .dispatcher
                            .dispatch(trigger.name(), kind, event, trigger.execute_notes)
                            .await;
                        report.firings.push(out.firing);
                        report.errors.extend(out.errors);
                    }
                }
            }
        }
    }
}

fn dedup_sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids.dedup();
    ids
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;

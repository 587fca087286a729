//! Shared harness for the behavioral specs.

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use cw_adapters::{FakeCalendarSource, FakeHostDispatch, FakeScriptRunner};
use cw_core::{CalendarEvent, FakeClock, FiringKind, SequentialIdGen};
use cw_engine::{Dispatcher, Poller, PollerConfig};
use cw_rules::{parse_rules, RuleSetHandle};
use std::time::Duration;

/// A poller wired to fake adapters, plus handles to all of them.
pub struct World {
    pub source: FakeCalendarSource,
    pub host: FakeHostDispatch,
    pub scripts: FakeScriptRunner,
    pub clock: FakeClock,
    pub handle: RuleSetHandle,
    pub poller: Poller<
        FakeCalendarSource,
        FakeHostDispatch,
        FakeScriptRunner,
        SequentialIdGen,
        FakeClock,
    >,
}

impl World {
    pub fn new(rules_toml: &str, start: DateTime<Utc>) -> Self {
        let source = FakeCalendarSource::new();
        let host = FakeHostDispatch::new();
        let scripts = FakeScriptRunner::new();
        let clock = FakeClock::new(start);
        let handle = RuleSetHandle::new();
        handle.replace(parse_rules(rules_toml).expect("spec rules must parse"));

        let dispatcher = Dispatcher::new(
            host.clone(),
            scripts.clone(),
            SequentialIdGen::default(),
            Duration::from_secs(5),
        );
        let poller = Poller::new(
            source.clone(),
            dispatcher,
            clock.clone(),
            handle.clone(),
            PollerConfig::default(),
        );
        World {
            source,
            host,
            scripts,
            clock,
            handle,
            poller,
        }
    }

    /// Advance the clock to `t` and run one cycle.
    pub async fn poll_at(&mut self, t: DateTime<Utc>) -> cw_engine::CycleReport {
        self.clock.set(t);
        self.poller.run_cycle().await
    }

    /// Every (trigger, kind, uid) delivered to the host so far.
    pub fn fired(&self) -> Vec<(String, FiringKind, String)> {
        self.host
            .firings()
            .into_iter()
            .map(|f| (f.trigger, f.kind, f.event.uid))
            .collect()
    }
}

/// A timestamp on the fixed test day.
pub fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, min, 0).unwrap()
}

pub fn timed(uid: &str, calendar: &str, title: &str, start: DateTime<Utc>, minutes: i64) -> CalendarEvent {
    CalendarEvent {
        uid: uid.to_string(),
        calendar: calendar.to_string(),
        occurrence: None,
        title: title.to_string(),
        notes: None,
        location: None,
        start,
        end: start + ChronoDuration::minutes(minutes),
        all_day: false,
    }
}

pub fn all_day(uid: &str, calendar: &str, title: &str, day_start: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        all_day: true,
        end: day_start + ChronoDuration::days(1),
        ..timed(uid, calendar, title, day_start, 0)
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notes-script execution adapters
//!
//! When a trigger opts into note execution, the event's notes field is
//! run as a shell script with the firing details exposed through
//! `CALWATCH_*` environment variables.

mod noop;
mod process;

pub use noop::NoOpScriptRunner;
pub use process::ProcessScriptRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeScriptRunner, ScriptCall};

use async_trait::async_trait;
use cw_core::{CalendarEvent, Firing, FiringKind};
use thiserror::Error;

/// Errors from script execution
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to run script: {0}")]
    Spawn(String),
}

/// Details a script sees about the firing that invoked it
#[derive(Debug, Clone)]
pub struct ScriptContext {
    pub trigger: String,
    pub kind: FiringKind,
    pub event: CalendarEvent,
}

impl ScriptContext {
    pub fn from_firing(firing: &Firing) -> Self {
        Self {
            trigger: firing.trigger.clone(),
            kind: firing.kind,
            event: firing.event.clone(),
        }
    }

    /// Environment bindings handed to the script process
    pub fn env_vars(&self) -> Vec<(String, String)> {
        let ev = &self.event;
        vec![
            ("CALWATCH_TRIGGER".to_string(), self.trigger.clone()),
            ("CALWATCH_KIND".to_string(), self.kind.to_string()),
            ("CALWATCH_EVENT_UID".to_string(), ev.uid.clone()),
            ("CALWATCH_EVENT_TITLE".to_string(), ev.title.clone()),
            (
                "CALWATCH_EVENT_NOTES".to_string(),
                ev.notes.clone().unwrap_or_default(),
            ),
            (
                "CALWATCH_EVENT_LOCATION".to_string(),
                ev.location.clone().unwrap_or_default(),
            ),
            ("CALWATCH_EVENT_CALENDAR".to_string(), ev.calendar.clone()),
            ("CALWATCH_EVENT_START".to_string(), ev.start.to_rfc3339()),
            ("CALWATCH_EVENT_END".to_string(), ev.end.to_rfc3339()),
            (
                "CALWATCH_EVENT_ALL_DAY".to_string(),
                ev.all_day.to_string(),
            ),
        ]
    }
}

/// What a finished script left behind
#[derive(Debug, Clone)]
pub struct ScriptOutcome {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ScriptOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Adapter for running an event's notes as a script
#[async_trait]
pub trait ScriptRunner: Clone + Send + Sync + 'static {
    async fn run(&self, script: &str, ctx: &ScriptContext) -> Result<ScriptOutcome, ScriptError>;
}

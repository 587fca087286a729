// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Firing dispatch
//!
//! Builds a firing for a satisfied trigger, delivers it to the host,
//! and runs the event's notes as a script when the trigger asks for
//! it. The host sees the firing before the script runs.

use crate::error::EngineError;
use cw_adapters::host::HostDispatch;
use cw_adapters::script::{ScriptContext, ScriptRunner};
use cw_core::{CalendarEvent, Firing, FiringKind, IdGen};
use std::time::Duration;

/// The firing that was attempted, with whatever went wrong
#[derive(Debug)]
pub struct Dispatched {
    pub firing: Firing,
    pub errors: Vec<EngineError>,
}

/// Delivers firings to the host and runs notes scripts
#[derive(Clone)]
pub struct Dispatcher<H, S, I> {
    host: H,
    scripts: S,
    ids: I,
    script_timeout: Duration,
}

impl<H: HostDispatch, S: ScriptRunner, I: IdGen> Dispatcher<H, S, I> {
    pub fn new(host: H, scripts: S, ids: I, script_timeout: Duration) -> Self {
        Self {
            host,
            scripts,
            ids,
            script_timeout,
        }
    }

    /// Fire one trigger for one event.
    ///
    /// Host delivery and the notes script fail independently; both
    /// outcomes land in the returned errors.
    pub async fn dispatch(
        &self,
        trigger: &str,
        kind: FiringKind,
        event: &CalendarEvent,
        run_notes: bool,
    ) -> Dispatched {
        let firing = Firing {
            id: self.ids.next(),
            trigger: trigger.to_string(),
            kind,
            event: event.clone(),
        };
        let mut errors = Vec::new();

        if let Err(e) = self.host.fire(&firing).await {
            errors.push(EngineError::HostDispatch {
                trigger: trigger.to_string(),
                source: e,
            });
        }

        if run_notes {
            if let Some(script) = notes_script(event) {
                let ctx = ScriptContext::from_firing(&firing);
                match tokio::time::timeout(self.script_timeout, self.scripts.run(script, &ctx))
                    .await
                {
                    Ok(Ok(outcome)) => {
                        if !outcome.success() {
                            tracing::warn!(
                                trigger,
                                exit_code = outcome.exit_code,
                                "notes script exited nonzero"
                            );
                        }
                    }
                    Ok(Err(e)) => errors.push(EngineError::Script {
                        trigger: trigger.to_string(),
                        source: e,
                    }),
                    Err(_) => errors.push(EngineError::ScriptTimeout {
                        trigger: trigger.to_string(),
                        timeout_secs: self.script_timeout.as_secs(),
                    }),
                }
            }
        }

        Dispatched { firing, errors }
    }
}

fn notes_script(event: &CalendarEvent) -> Option<&str> {
    event
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake script runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ScriptContext, ScriptError, ScriptOutcome, ScriptRunner};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Recorded script invocation
#[derive(Debug, Clone)]
pub struct ScriptCall {
    pub script: String,
    pub trigger: String,
    pub event_uid: String,
}

/// Fake runner that records invocations and returns scripted outcomes
#[derive(Clone)]
pub struct FakeScriptRunner {
    calls: Arc<Mutex<Vec<ScriptCall>>>,
    exit_code: Arc<Mutex<i32>>,
    fail_next: Arc<Mutex<u32>>,
}

impl Default for FakeScriptRunner {
    fn default() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            exit_code: Arc::new(Mutex::new(0)),
            fail_next: Arc::new(Mutex::new(0)),
        }
    }
}

impl FakeScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// All invocations so far, in order
    pub fn calls(&self) -> Vec<ScriptCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Exit code returned for every subsequent invocation
    pub fn set_exit_code(&self, code: i32) {
        *self.exit_code.lock().unwrap_or_else(|e| e.into_inner()) = code;
    }

    /// Make the next `count` invocations fail to spawn
    pub fn fail_next(&self, count: u32) {
        *self.fail_next.lock().unwrap_or_else(|e| e.into_inner()) = count;
    }
}

#[async_trait]
impl ScriptRunner for FakeScriptRunner {
    async fn run(&self, script: &str, ctx: &ScriptContext) -> Result<ScriptOutcome, ScriptError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(ScriptCall {
                script: script.to_string(),
                trigger: ctx.trigger.clone(),
                event_uid: ctx.event.uid.clone(),
            });

        {
            let mut fail = self.fail_next.lock().unwrap_or_else(|e| e.into_inner());
            if *fail > 0 {
                *fail -= 1;
                return Err(ScriptError::Spawn("fake spawn failure".to_string()));
            }
        }

        Ok(ScriptOutcome {
            exit_code: *self.exit_code.lock().unwrap_or_else(|e| e.into_inner()),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

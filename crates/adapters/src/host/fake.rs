// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake host dispatch for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{HostDispatch, HostError};
use async_trait::async_trait;
use cw_core::Firing;
use std::sync::{Arc, Mutex};

/// Fake host that records every firing and can be told to fail
#[derive(Clone, Default)]
pub struct FakeHostDispatch {
    firings: Arc<Mutex<Vec<Firing>>>,
    fail_next: Arc<Mutex<u32>>,
}

impl FakeHostDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// All firings delivered so far, in order
    pub fn firings(&self) -> Vec<Firing> {
        self.firings.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Make the next `count` fire calls fail
    pub fn fail_next(&self, count: u32) {
        *self.fail_next.lock().unwrap_or_else(|e| e.into_inner()) = count;
    }
}

#[async_trait]
impl HostDispatch for FakeHostDispatch {
    async fn fire(&self, firing: &Firing) -> Result<(), HostError> {
        {
            let mut fail = self.fail_next.lock().unwrap_or_else(|e| e.into_inner());
            if *fail > 0 {
                *fail -= 1;
                return Err(HostError::Unreachable("fake dispatch failure".to_string()));
            }
        }
        self.firings
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(firing.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

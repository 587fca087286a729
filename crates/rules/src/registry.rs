// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared handle for atomic rule-set replacement
//!
//! The configuration collaborator may store a replacement rule set at
//! any time; the poll loop takes it at the start of the next cycle, so
//! a swap never lands mid-evaluation.

use crate::parser::RuleSet;
use std::sync::{Arc, Mutex};

/// Cloneable slot holding at most one pending rule set
#[derive(Clone, Default)]
pub struct RuleSetHandle {
    pending: Arc<Mutex<Option<Arc<RuleSet>>>>,
}

impl RuleSetHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a replacement rule set, superseding any pending one
    pub fn replace(&self, rules: RuleSet) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *pending = Some(Arc::new(rules));
    }

    /// Take the pending rule set, if any. Called by the poll loop
    /// between cycles.
    pub fn take_pending(&self) -> Option<Arc<RuleSet>> {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.take()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Firing id generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Produces the unique id stamped on each firing
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// Random UUIDs for production firings
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `firing-N` ids for tests. Clones share the counter.
#[derive(Clone, Default)]
pub struct SequentialIdGen {
    counter: Arc<AtomicU64>,
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("firing-{}", n + 1)
    }
}

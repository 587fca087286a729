// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Calwatch polling engine
//!
//! Each cycle reads the monitored calendars, diffs against the prior
//! snapshot, and fires the triggers satisfied by boundary crossings
//! and set changes.

mod dispatch;
mod error;
mod evaluate;
mod poller;
mod snapshot;

pub use dispatch::{Dispatched, Dispatcher};
pub use error::EngineError;
pub use evaluate::{change_trigger_matches, edges_in_window, event_trigger_matches};
pub use poller::{CycleReport, Poller, PollerConfig};
pub use snapshot::SnapshotStore;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O: calendar sources, the host trigger-fire
//! interface, and script execution

pub mod calendar;
pub mod host;
pub mod script;
pub mod traced;

pub use calendar::{CalendarSource, IcsDirSource, NoOpCalendarSource};
pub use host::{HostDispatch, LogHostDispatch, NoOpHostDispatch};
pub use script::{
    NoOpScriptRunner, ProcessScriptRunner, ScriptContext, ScriptOutcome, ScriptRunner,
};
pub use traced::{TracedCalendarSource, TracedHostDispatch};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use calendar::{CalendarCall, FakeCalendarSource};
#[cfg(any(test, feature = "test-support"))]
pub use host::FakeHostDispatch;
#[cfg(any(test, feature = "test-support"))]
pub use script::{FakeScriptRunner, ScriptCall};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cw-core: Core types for the calwatch engine
//!
//! This crate provides:
//! - Calendar event values and their stable identity keys
//! - Delta partitions between consecutive calendar snapshots
//! - Firing records handed to the host dispatch interface
//! - Clock and ID-generation abstractions for testable time and ids

pub mod clock;
pub mod delta;
pub mod event;
pub mod firing;
pub mod id;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use delta::{ChangedEvent, Delta};
pub use event::{CalendarEvent, CalendarInfo, EventKey, TimeWindow};
pub use firing::{Firing, FiringKind};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};

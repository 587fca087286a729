// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Trigger rule definitions for calwatch
//!
//! Rules are declared in TOML (`[[event]]` and `[[change]]` tables,
//! file order = evaluation order), compiled into regex-backed filters
//! at load time, and validated statically before the engine ever sees
//! them.

mod parser;
mod pattern;
mod registry;
mod trigger;
mod validate;

pub use parser::{parse_rules, DisabledRule, ParseError, RuleSet};
pub use pattern::Pattern;
pub use registry::RuleSetHandle;
pub use trigger::{ChangeTrigger, EventFilter, EventTrigger};
pub use validate::{validate, RuleWarning};

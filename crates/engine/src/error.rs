// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the polling engine

use cw_adapters::calendar::CalendarError;
use cw_adapters::host::HostError;
use cw_adapters::script::ScriptError;
use thiserror::Error;

/// Errors that can occur during a poll cycle
///
/// A cycle never aborts on these; they are collected into the cycle
/// report and the affected calendar or firing is skipped.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("calendar listing failed: {0}")]
    ListCalendars(#[source] CalendarError),
    #[error("calendar {calendar} read failed: {source}")]
    CalendarRead {
        calendar: String,
        #[source]
        source: CalendarError,
    },
    #[error("calendar {calendar} read timed out after {timeout_secs}s")]
    ReadTimeout { calendar: String, timeout_secs: u64 },
    #[error("host dispatch failed for trigger {trigger}: {source}")]
    HostDispatch {
        trigger: String,
        #[source]
        source: HostError,
    },
    #[error("notes script failed for trigger {trigger}: {source}")]
    Script {
        trigger: String,
        #[source]
        source: ScriptError,
    },
    #[error("notes script for trigger {trigger} timed out after {timeout_secs}s")]
    ScriptTimeout { trigger: String, timeout_secs: u64 },
}

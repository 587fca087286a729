// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Firing records handed to the host dispatch interface

use crate::event::CalendarEvent;
use serde::{Deserialize, Serialize};

/// What a trigger matched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiringKind {
    /// The event's start crossed into the elapsed poll window
    Start,
    /// The event's end crossed into the elapsed poll window
    End,
    /// The event appeared between polls
    Inserted,
    /// The event disappeared between polls
    Removed,
    /// The event's content differed between polls
    Changed,
}

impl FiringKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FiringKind::Start => "start",
            FiringKind::End => "end",
            FiringKind::Inserted => "inserted",
            FiringKind::Removed => "removed",
            FiringKind::Changed => "changed",
        }
    }
}

impl std::fmt::Display for FiringKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One satisfied trigger predicate, dispatched to the host exactly once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firing {
    /// Unique id for host-side correlation
    pub id: String,
    /// Name of the trigger whose predicates were satisfied
    pub trigger: String,
    pub kind: FiringKind,
    pub event: CalendarEvent,
}

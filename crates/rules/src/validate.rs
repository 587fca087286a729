// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static rule validation
//!
//! Runs at load/edit time, before a rule set reaches the engine.
//! Warnings never disable a rule; a degenerate rule is registered and
//! simply never fires.

use crate::parser::RuleSet;
use thiserror::Error;

/// Configuration warnings produced by [`validate`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleWarning {
    #[error("rule '{0}' has no title pattern and will match any event title")]
    MissingTitle(String),
    #[error("rule '{0}' matches neither start nor end and will never fire")]
    NoEdgeSelected(String),
    #[error("rule '{0}' matches neither hourly nor all-day events and will never fire")]
    NoDurationClass(String),
    #[error("rule '{0}' matches no change kind and will never fire")]
    NoChangeKind(String),
    #[error("rule '{0}' sets execute_notes but can never fire")]
    UnreachableNotes(String),
}

/// Validate a rule set, returning warnings in rule order
pub fn validate(rules: &RuleSet) -> Vec<RuleWarning> {
    let mut warnings = Vec::new();

    for trigger in &rules.events {
        let name = trigger.name().to_string();
        if trigger.filter.title.is_none() {
            warnings.push(RuleWarning::MissingTitle(name.clone()));
        }
        let no_edge = !trigger.match_start && !trigger.match_end;
        let no_class = !trigger.match_hourly && !trigger.match_allday;
        if no_edge {
            warnings.push(RuleWarning::NoEdgeSelected(name.clone()));
        }
        if no_class {
            warnings.push(RuleWarning::NoDurationClass(name.clone()));
        }
        if trigger.execute_notes && (no_edge || no_class) {
            warnings.push(RuleWarning::UnreachableNotes(name));
        }
    }

    for trigger in &rules.changes {
        let name = trigger.name().to_string();
        if trigger.filter.title.is_none() {
            warnings.push(RuleWarning::MissingTitle(name.clone()));
        }
        if !trigger.match_inserted && !trigger.match_removed && !trigger.match_changed {
            warnings.push(RuleWarning::NoChangeKind(name));
        }
    }

    warnings
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;

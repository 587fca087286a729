// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule TOML parsing

use crate::pattern::Pattern;
use crate::trigger::{ChangeTrigger, EventFilter, EventTrigger};
use thiserror::Error;

/// Errors that can occur during rule parsing
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing required field: {0}")]
    MissingField(String),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// A rule that failed to compile and is excluded from evaluation.
///
/// Reported once at load time; the rest of the file stays live.
#[derive(Debug, Clone)]
pub struct DisabledRule {
    pub name: String,
    pub error: String,
}

/// A parsed rule set, in file (= evaluation) order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pub events: Vec<EventTrigger>,
    pub changes: Vec<ChangeTrigger>,
    pub disabled: Vec<DisabledRule>,
}

impl RuleSet {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.changes.is_empty()
    }

    /// Union of explicit calendar selectors; None when any rule
    /// matches all calendars
    pub fn selected_calendars(&self) -> Option<Vec<String>> {
        let mut selected = Vec::new();
        let filters = self
            .events
            .iter()
            .map(|t| &t.filter)
            .chain(self.changes.iter().map(|t| &t.filter));
        for filter in filters {
            match &filter.calendar {
                Some(calendar) => {
                    if !selected.contains(calendar) {
                        selected.push(calendar.clone());
                    }
                }
                None => return None,
            }
        }
        Some(selected)
    }
}

/// Parse rules from TOML content.
///
/// Rules live in `[[event]]` and `[[change]]` array-of-tables so the
/// file order is preserved as the evaluation order. A malformed regex
/// disables only the rule that carries it.
pub fn parse_rules(content: &str) -> Result<RuleSet, ParseError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("root must be a table".to_string()))?;

    let mut rules = RuleSet::default();

    if let Some(events) = table.get("event") {
        let arr = events.as_array().ok_or_else(|| {
            ParseError::InvalidFormat("event must be an array of tables".to_string())
        })?;
        for value in arr {
            match parse_event_trigger(value)? {
                Ok(trigger) => rules.events.push(trigger),
                Err(disabled) => rules.disabled.push(disabled),
            }
        }
    }

    if let Some(changes) = table.get("change") {
        let arr = changes.as_array().ok_or_else(|| {
            ParseError::InvalidFormat("change must be an array of tables".to_string())
        })?;
        for value in arr {
            match parse_change_trigger(value)? {
                Ok(trigger) => rules.changes.push(trigger),
                Err(disabled) => rules.disabled.push(disabled),
            }
        }
    }

    Ok(rules)
}

type RuleResult<T> = Result<Result<T, DisabledRule>, ParseError>;

fn parse_event_trigger(value: &toml::Value) -> RuleResult<EventTrigger> {
    let table = value
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("event rule must be a table".to_string()))?;
    let name = rule_name(table, "event")?;

    let filter = match parse_filter(&name, table)? {
        Ok(filter) => filter,
        Err(disabled) => return Ok(Err(disabled)),
    };

    let mut trigger = EventTrigger::new(filter);
    trigger.match_start = bool_field(table, "match_start", true);
    trigger.match_end = bool_field(table, "match_end", true);
    trigger.match_hourly = bool_field(table, "match_hourly", true);
    trigger.match_allday = bool_field(table, "match_allday", true);
    trigger.execute_notes = bool_field(table, "execute_notes", false);
    Ok(Ok(trigger))
}

fn parse_change_trigger(value: &toml::Value) -> RuleResult<ChangeTrigger> {
    let table = value
        .as_table()
        .ok_or_else(|| ParseError::InvalidFormat("change rule must be a table".to_string()))?;
    let name = rule_name(table, "change")?;

    let filter = match parse_filter(&name, table)? {
        Ok(filter) => filter,
        Err(disabled) => return Ok(Err(disabled)),
    };

    let mut trigger = ChangeTrigger::new(filter);
    trigger.match_inserted = bool_field(table, "match_inserted", true);
    trigger.match_removed = bool_field(table, "match_removed", true);
    trigger.match_changed = bool_field(table, "match_changed", true);
    Ok(Ok(trigger))
}

fn parse_filter(name: &str, table: &toml::value::Table) -> RuleResult<EventFilter> {
    let mut filter = EventFilter::new(name);

    for (field, slot) in [
        ("title", &mut filter.title),
        ("notes", &mut filter.notes),
        ("location", &mut filter.location),
    ] {
        let Some(raw) = str_field(table, field)? else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        match Pattern::compile(&raw) {
            Ok(pattern) => *slot = Some(pattern),
            Err(e) => {
                return Ok(Err(DisabledRule {
                    name: name.to_string(),
                    error: format!("invalid {} pattern: {}", field, e),
                }))
            }
        }
    }

    // 'ALL' selects every calendar, mirroring the menu sentinel
    filter.calendar = str_field(table, "calendar")?.filter(|c| !c.is_empty() && c != "ALL");

    Ok(Ok(filter))
}

fn rule_name(table: &toml::value::Table, kind: &str) -> Result<String, ParseError> {
    table
        .get("name")
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| ParseError::MissingField(format!("{}.name", kind)))
}

fn str_field(table: &toml::value::Table, key: &str) -> Result<Option<String>, ParseError> {
    match table.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| ParseError::InvalidFormat(format!("{} must be a string", key))),
    }
}

fn bool_field(table: &toml::value::Table, key: &str, default: bool) -> bool {
    table.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

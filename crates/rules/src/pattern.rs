// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled text patterns for rule filters

use regex::{Regex, RegexBuilder};

/// A case-insensitive, unanchored regex pattern.
///
/// Matching is substring-style: the pattern only needs to occur
/// somewhere in the field, like `re.search`.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    regex: Regex,
}

impl Pattern {
    pub fn compile(raw: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(raw).case_insensitive(true).build()?;
        Ok(Self {
            raw: raw.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Match against an optional field: an absent field never matches
    pub fn matches_opt(&self, text: Option<&str>) -> bool {
        text.map_or(false, |t| self.matches(t))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;

//! Evaluates a structured filter query against a snapshot of lines.
//!
//! Filtering preserves the relative order of its input and never mutates it;
//! ordering is a separate stage (`catalog::sort`).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Line;

use super::classify::{ExtraClass, classify};
use super::entry::parse_tags;

/// Include/exclude value sets for one field. An empty include set means
/// "no restriction"; excludes always win over includes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub include: BTreeSet<String>,
    pub exclude: BTreeSet<String>,
}

/// Per-(field, value) cycle driven by repeated clicks on a filter chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    Neutral,
    Included,
    Excluded,
}

impl Selection {
    #[must_use]
    pub fn state_of(&self, value: &str) -> TriState {
        if self.include.contains(value) {
            TriState::Included
        } else if self.exclude.contains(value) {
            TriState::Excluded
        } else {
            TriState::Neutral
        }
    }

    /// Advances the cycle Neutral → Included → Excluded → Neutral and
    /// returns the new state.
    pub fn toggle(&mut self, value: &str) -> TriState {
        match self.state_of(value) {
            TriState::Neutral => {
                self.include.insert(value.to_string());
                TriState::Included
            }
            TriState::Included => {
                self.include.remove(value);
                self.exclude.insert(value.to_string());
                TriState::Excluded
            }
            TriState::Excluded => {
                self.exclude.remove(value);
                TriState::Neutral
            }
        }
    }

    fn allows(&self, value: &str) -> bool {
        if !self.exclude.is_empty() && self.exclude.contains(value) {
            return false;
        }
        if !self.include.is_empty() && !self.include.contains(value) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterQuery {
    /// Case-insensitive substring over the name or any synonym.
    /// Blank disables the criterion.
    pub name_text: String,
    pub status: Selection,
    pub content: Selection,
    pub opinion: Selection,
    pub tags: Selection,
    /// When false (the default), adult-classified manhwa entries are hidden
    /// regardless of the other criteria.
    pub censor_adult: bool,
}

/// AND across every active criterion.
#[must_use]
pub fn matches(line: &Line, query: &FilterQuery) -> bool {
    let needle = query.name_text.trim().to_lowercase();
    if !needle.is_empty() {
        let in_name = line.name.to_lowercase().contains(&needle);
        let in_synonym = line
            .synonyms
            .iter()
            .any(|s| s.to_lowercase().contains(&needle));
        if !in_name && !in_synonym {
            return false;
        }
    }

    if !query.status.allows(&line.status)
        || !query.content.allows(&line.content)
        || !query.opinion.allows(&line.opinion)
    {
        return false;
    }

    let tags = parse_tags(&line.tags);
    if query.tags.exclude.iter().any(|bad| tags.contains(bad)) {
        return false;
    }
    if !query.tags.include.is_empty() && !query.tags.include.iter().all(|want| tags.contains(want))
    {
        return false;
    }

    if !query.censor_adult
        && classify(line) == ExtraClass::Adult
        && line.content.trim().eq_ignore_ascii_case("manhwa")
    {
        return false;
    }

    true
}

/// Stable filter: keeps input order, returns a new vector.
#[must_use]
pub fn filter(lines: &[Line], query: &FilterQuery) -> Vec<Line> {
    lines
        .iter()
        .filter(|line| matches(line, query))
        .cloned()
        .collect()
}

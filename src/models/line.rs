use serde::{Deserialize, Serialize};

use crate::constants::images::is_placeholder;

/// One catalog entry ("line") as exchanged between the store, the catalog
/// engine and the API. Synonyms are normalized to a real vector here; the
/// column stores them as a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: i32,
    pub list_id: i32,
    pub name: String,
    pub content: String,
    pub status: String,
    pub opinion: String,
    pub episode: String,
    pub tags: String,
    pub image_url: Option<String>,
    pub synopsis: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    pub last_highlight: Option<String>,
}

impl Line {
    /// Decodes the denormalized synonyms column. Accepts a JSON array of
    /// strings or a bare string; anything malformed degrades to empty.
    #[must_use]
    pub fn parse_synonyms(raw: Option<&str>) -> Vec<String> {
        let Some(raw) = raw else {
            return Vec::new();
        };
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| match v {
                    serde_json::Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            Ok(serde_json::Value::String(s)) if !s.is_empty() => vec![s],
            _ => Vec::new(),
        }
    }

    /// A line is considered enriched once it has a synopsis and at least
    /// three known synonyms.
    #[must_use]
    pub fn needs_details(&self) -> bool {
        self.synopsis.as_deref().is_none_or(str::is_empty) || self.synonyms.len() < 3
    }

    /// True when the cover is missing or still the unresolved sentinel.
    #[must_use]
    pub fn needs_image(&self) -> bool {
        self.image_url.as_deref().is_none_or(is_placeholder)
    }
}

/// Fields accepted when creating a line. The list binding is fixed at
/// creation; enrichment fills the remaining columns later.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLine {
    pub list_id: i32,
    pub name: String,
    pub content: String,
    pub status: String,
    pub opinion: String,
    #[serde(default)]
    pub episode: String,
    #[serde(default)]
    pub tags: String,
}

/// Full-field replace used by the edit form. Image, synopsis and synonyms
/// have their own narrow updates.
#[derive(Debug, Clone, Deserialize)]
pub struct LineUpdate {
    pub name: String,
    pub content: String,
    pub status: String,
    pub opinion: String,
    #[serde(default)]
    pub episode: String,
    #[serde(default)]
    pub tags: String,
}

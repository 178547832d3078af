use serde::{Deserialize, Serialize};

use crate::models::Line;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// A member line together with its 1-based position inside the sequence.
/// Positions may have gaps after removals; they are never renumbered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceItem {
    pub position: i32,
    #[serde(flatten)]
    pub line: Line,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub item_count: i64,
}

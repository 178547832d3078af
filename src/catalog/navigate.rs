//! Index-based navigation over the detail view's context list, which is
//! either the last filtered/sorted view or a sequence's item list. Arrow
//! keys map to a grid: left/right move by one, up/down by a row of five.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Right => 1,
            Self::Left => -1,
            Self::Down => 5,
            Self::Up => -5,
        }
    }
}

/// Position of the open entry inside its context list.
#[derive(Debug, Clone)]
pub struct NavContext {
    ids: Vec<i32>,
    current: Option<usize>,
}

impl NavContext {
    /// An unknown current id yields an inert context: every move is a no-op.
    #[must_use]
    pub fn new(ids: Vec<i32>, current_id: i32) -> Self {
        let current = ids.iter().position(|&id| id == current_id);
        Self { ids, current }
    }

    #[must_use]
    pub fn current_id(&self) -> Option<i32> {
        self.current.map(|idx| self.ids[idx])
    }

    /// Moves by `delta` positions. Out-of-range targets leave the position
    /// unchanged and return `None`; moves never wrap.
    pub fn step(&mut self, delta: i64) -> Option<i32> {
        let current = i64::try_from(self.current?).ok()?;
        let target = current + delta;
        if target < 0 || target >= i64::try_from(self.ids.len()).ok()? {
            return None;
        }
        let idx = usize::try_from(target).ok()?;
        self.current = Some(idx);
        Some(self.ids[idx])
    }

    pub fn go(&mut self, direction: Direction) -> Option<i32> {
        self.step(direction.delta())
    }
}

/// Caption describing where a line sits inside its sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencePosition {
    /// Direct continuation of the named predecessor.
    After(String),
    /// First of several; the successor is named.
    OpeningBefore(String),
    /// Alone in its sequence, or not a member at all.
    Alone,
}

impl SequencePosition {
    /// Locates `line_id` inside the ordered `(id, name)` item list.
    #[must_use]
    pub fn locate(items: &[(i32, String)], line_id: i32) -> Self {
        match items.iter().position(|(id, _)| *id == line_id) {
            Some(idx) if idx > 0 => Self::After(items[idx - 1].1.clone()),
            Some(0) if items.len() > 1 => Self::OpeningBefore(items[1].1.clone()),
            _ => Self::Alone,
        }
    }
}

impl fmt::Display for SequencePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::After(name) => write!(f, "Sequência após {name}"),
            Self::OpeningBefore(name) => write!(f, "Primeira temporada, antes de {name}"),
            Self::Alone => Ok(()),
        }
    }
}

//! User-selectable orderings over a filtered snapshot. All strategies are
//! stable: lines with equal keys keep their relative input order.

use serde::{Deserialize, Serialize};

use crate::models::Line;

use super::classify::{ExtraClass, classify};
use super::entry::episode_number;
use super::title::fold_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    NameAsc,
    NameDesc,
    EpisodeAsc,
    EpisodeDesc,
    OpinionPriority,
}

/// Opinion vocabulary from best to worst; unknown values rank after all of
/// these.
pub const OPINION_ORDER: [&str; 8] = [
    "Favorito",
    "Muito Bom",
    "Recomendo",
    "Bom",
    "Mediano",
    "Ruim",
    "Horrivel",
    "Não vi",
];

/// Composite ranking behind `OpinionPriority`: the derived class outranks
/// the raw opinion.
#[must_use]
pub fn opinion_rank(line: &Line) -> u32 {
    let class = classify(line);
    let opinion = line.opinion.trim();

    match class {
        ExtraClass::BestLove => 0,
        ExtraClass::Goat => 1,
        ExtraClass::Love if opinion == "Favorito" => 2,
        _ => OPINION_ORDER
            .iter()
            .position(|o| *o == opinion)
            .map_or(99, |idx| 3 + u32::try_from(idx).unwrap_or(0)),
    }
}

/// Returns a newly ordered vector; the input snapshot is untouched.
#[must_use]
pub fn sort(lines: &[Line], strategy: SortStrategy) -> Vec<Line> {
    let mut out = lines.to_vec();
    match strategy {
        SortStrategy::NameAsc => out.sort_by_cached_key(|l| fold_key(&l.name)),
        SortStrategy::NameDesc => out.sort_by(|a, b| fold_key(&b.name).cmp(&fold_key(&a.name))),
        SortStrategy::EpisodeAsc => out.sort_by_cached_key(|l| episode_number(&l.episode)),
        SortStrategy::EpisodeDesc => {
            out.sort_by(|a, b| episode_number(&b.episode).cmp(&episode_number(&a.episode)));
        }
        SortStrategy::OpinionPriority => out.sort_by_cached_key(opinion_rank),
    }
    out
}

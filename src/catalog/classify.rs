//! Derives the single "extra class" of a line from its tags, status and
//! opinion. The class drives card styling, the adult-content censor rule
//! and the opinion-priority ordering.

use crate::models::Line;

use super::entry::parse_tags;

/// Exactly one class per line; rules are checked in declaration order and
/// the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraClass {
    #[default]
    None,
    BestLove,
    Goat,
    Cancelled,
    Love,
    Adult,
    ActionPick,
}

impl ExtraClass {
    /// Stable wire label, used as the card CSS class by consumers.
    #[must_use]
    pub const fn as_css_class(self) -> &'static str {
        match self {
            Self::None => "",
            Self::BestLove => "best-love",
            Self::Goat => "goat",
            Self::Cancelled => "cancelled",
            Self::Love => "love",
            Self::Adult => "adult",
            Self::ActionPick => "action-pick",
        }
    }
}

#[must_use]
pub fn classify(line: &Line) -> ExtraClass {
    let tags = parse_tags(&line.tags);
    let has = |tag: &str| tags.iter().any(|t| t == tag);

    let love_core = has("Beijo")
        && has("Romance do bom")
        && (has("Namoro") || has("Casamento") || has("Noivado"));

    if has("Goat") && love_core {
        return ExtraClass::BestLove;
    }

    if has("Goat") {
        return ExtraClass::Goat;
    }

    if line.status == "Cancelado" {
        return ExtraClass::Cancelled;
    }

    if love_core {
        return ExtraClass::Love;
    }

    if has("Ecchi")
        && (has("Nudez") || has("Nudez Nippleless"))
        && (has("Incesto")
            || has("Sexo")
            || has("Yuri")
            || has("Vida Escolar")
            || has("Dormitorios")
            || matches!(line.opinion.as_str(), "Mediano" | "Ruim" | "Horrivel"))
    {
        return ExtraClass::Adult;
    }

    // Both dormitory spellings occur in stored data; either blocks the pick.
    if has("Ação")
        && matches!(
            line.opinion.as_str(),
            "Recomendo" | "Muito Bom" | "Bom" | "Favorito"
        )
        && has("Shounen")
        && !has("Dormitorio")
        && !has("Dormitorios")
        && !(has("Fez Filho(s)") && has("Gravidez"))
    {
        return ExtraClass::ActionPick;
    }

    ExtraClass::None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(tags: &str, status: &str, opinion: &str) -> Line {
        Line {
            id: 1,
            list_id: 1,
            name: "Test".to_string(),
            content: "Anime".to_string(),
            status: status.to_string(),
            opinion: opinion.to_string(),
            episode: "1".to_string(),
            tags: tags.to_string(),
            image_url: None,
            synopsis: None,
            synonyms: Vec::new(),
            last_highlight: None,
        }
    }

    #[test]
    fn best_love_needs_goat_and_commitment() {
        let l = line("Goat,Beijo,Romance do bom,Namoro", "Lendo", "Bom");
        assert_eq!(classify(&l), ExtraClass::BestLove);
    }

    #[test]
    fn goat_without_love_core() {
        let l = line("Goat,Aventura", "Vendo", "Bom");
        assert_eq!(classify(&l), ExtraClass::Goat);
    }

    #[test]
    fn cancelled_status_short_circuits() {
        let l = line("Aventura", "Cancelado", "Bom");
        assert_eq!(classify(&l), ExtraClass::Cancelled);
    }

    #[test]
    fn goat_beats_cancelled() {
        let l = line("Goat", "Cancelado", "Bom");
        assert_eq!(classify(&l), ExtraClass::Goat);
    }

    #[test]
    fn love_without_goat() {
        let l = line("Beijo,Romance do bom,Casamento", "Vendo", "Bom");
        assert_eq!(classify(&l), ExtraClass::Love);
    }

    #[test]
    fn adult_by_companion_tag() {
        let l = line("Ecchi,Nudez,Vida Escolar", "Lendo", "Bom");
        assert_eq!(classify(&l), ExtraClass::Adult);
    }

    #[test]
    fn adult_by_weak_opinion() {
        let l = line("Ecchi,Nudez Nippleless", "Lendo", "Mediano");
        assert_eq!(classify(&l), ExtraClass::Adult);
    }

    #[test]
    fn ecchi_alone_is_not_adult() {
        let l = line("Ecchi,Nudez", "Lendo", "Bom");
        assert_eq!(classify(&l), ExtraClass::None);
    }

    #[test]
    fn best_love_wins_over_adult() {
        // Rule order is fixed: an entry matching both classifies as BestLove.
        let l = line(
            "Goat,Beijo,Romance do bom,Namoro,Ecchi,Nudez,Sexo",
            "Lendo",
            "Mediano",
        );
        assert_eq!(classify(&l), ExtraClass::BestLove);
    }

    #[test]
    fn action_pick_happy_path() {
        let l = line("Ação,Shounen", "Vendo", "Recomendo");
        assert_eq!(classify(&l), ExtraClass::ActionPick);
    }

    #[test]
    fn action_pick_blocked_by_dormitory_either_spelling() {
        let singular = line("Ação,Shounen,Dormitorio", "Vendo", "Recomendo");
        let plural = line("Ação,Shounen,Dormitorios", "Vendo", "Recomendo");
        assert_eq!(classify(&singular), ExtraClass::None);
        assert_eq!(classify(&plural), ExtraClass::None);
    }

    #[test]
    fn action_pick_blocked_by_offspring_and_pregnancy_together() {
        let both = line("Ação,Shounen,Fez Filho(s),Gravidez", "Vendo", "Bom");
        let only_one = line("Ação,Shounen,Gravidez", "Vendo", "Bom");
        assert_eq!(classify(&both), ExtraClass::None);
        assert_eq!(classify(&only_one), ExtraClass::ActionPick);
    }

    #[test]
    fn classify_is_deterministic() {
        let l = line("Goat,Beijo,Romance do bom,Noivado", "Vendo", "Favorito");
        assert_eq!(classify(&l), classify(&l));
    }

    #[test]
    fn unknown_vocabulary_is_none() {
        let l = line("Aventura,Magia", "Vendo", "Bom");
        assert_eq!(classify(&l), ExtraClass::None);
    }
}

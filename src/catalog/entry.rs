//! Small helpers over the raw line fields shared by the rest of the engine.

use std::fmt;
use std::str::FromStr;

/// Which external lookup family a content type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Anime,
    Manga,
}

impl LookupKind {
    /// Anime and movies resolve against the anime catalog; every printed
    /// format (manga, manhwa, webtoon, novel) resolves against manga.
    #[must_use]
    pub fn for_content(content: &str) -> Self {
        match content.trim().to_lowercase().as_str() {
            "anime" | "filme" => Self::Anime,
            _ => Self::Manga,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anime" => Ok(Self::Anime),
            "manga" => Ok(Self::Manga),
            other => Err(format!("unknown lookup kind '{other}'")),
        }
    }
}

/// Parses the denormalized comma-separated tag column into trimmed tokens.
/// Empty segments are dropped; duplicates and order are preserved.
#[must_use]
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Numeric value of the episode column for ordering. Mirrors a lenient
/// integer parse: leading digits count, anything else is 0.
#[must_use]
pub fn episode_number(episode: &str) -> i64 {
    let trimmed = episode.trim();
    let unsigned = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();
    let value = digits.parse::<i64>().unwrap_or(0);
    if trimmed.starts_with('-') { -value } else { value }
}

/// Unit label for the episode field, by content type.
#[must_use]
pub fn episode_label(content: &str) -> &'static str {
    match content.trim().to_lowercase().as_str() {
        "filme" => "Filmes",
        "manga" | "manhwa" | "webtoon" => "Capítulos",
        _ => "Episódio",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_trims_and_drops_empties() {
        assert_eq!(parse_tags("A, B ,C"), vec!["A", "B", "C"]);
        assert_eq!(parse_tags("A,,B,"), vec!["A", "B"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags("  ,  ").is_empty());
    }

    #[test]
    fn tags_round_trip() {
        let parsed = parse_tags("Romance do bom ,Beijo,  Goat");
        assert_eq!(join_tags(&parsed), "Romance do bom, Beijo, Goat");
        assert_eq!(parse_tags(&join_tags(&parsed)), parsed);
    }

    #[test]
    fn episode_number_is_lenient() {
        assert_eq!(episode_number("12"), 12);
        assert_eq!(episode_number(" 7 "), 7);
        assert_eq!(episode_number("12.5"), 12);
        assert_eq!(episode_number("especial"), 0);
        assert_eq!(episode_number(""), 0);
    }

    #[test]
    fn lookup_kind_per_content() {
        assert_eq!(LookupKind::for_content("Anime"), LookupKind::Anime);
        assert_eq!(LookupKind::for_content("Filme"), LookupKind::Anime);
        assert_eq!(LookupKind::for_content("Manhwa"), LookupKind::Manga);
        assert_eq!(LookupKind::for_content("Novel"), LookupKind::Manga);
        assert_eq!(LookupKind::for_content("  webtoon "), LookupKind::Manga);
    }

    #[test]
    fn episode_labels() {
        assert_eq!(episode_label("Filme"), "Filmes");
        assert_eq!(episode_label("Manga"), "Capítulos");
        assert_eq!(episode_label("Anime"), "Episódio");
        assert_eq!(episode_label("Novel"), "Episódio");
    }
}

//! Series-title handling: splitting a name into its base title plus a
//! trailing Roman-numeral season marker, and the collation key used for
//! accent- and case-insensitive ordering.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::Line;

/// Only I through X are recognized as season markers; anything longer or
/// irregular stays part of the base title.
fn roman_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(X|IX|VIII|VII|VI|V|IV|III|II|I)\b").expect("invalid roman numeral pattern")
    })
}

/// Splits `"Show II"` into `("Show", Some("II"))`; names without a
/// recognized numeral come back whole.
#[must_use]
pub fn split_series_title(name: &str) -> (String, Option<String>) {
    roman_regex().find(name).map_or_else(
        || (name.trim().to_string(), None),
        |m| {
            let mut base = String::with_capacity(name.len());
            base.push_str(&name[..m.start()]);
            base.push_str(&name[m.end()..]);
            (base.trim().to_string(), Some(m.as_str().to_string()))
        },
    )
}

/// No numeral sorts first (-1); recognized numerals by value; anything the
/// map does not know sorts last.
#[must_use]
pub fn roman_to_decimal(numeral: Option<&str>) -> i32 {
    match numeral {
        None => -1,
        Some("I") => 1,
        Some("II") => 2,
        Some("III") => 3,
        Some("IV") => 4,
        Some("V") => 5,
        Some("VI") => 6,
        Some("VII") => 7,
        Some("VIII") => 8,
        Some("IX") => 9,
        Some("X") => 10,
        Some(_) => 99,
    }
}

/// Collation key: lower-cased with the Portuguese diacritics that occur in
/// the vocabulary folded away, approximating pt-BR base-sensitivity compare.
#[must_use]
pub fn fold_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Ordering used for the initial list load: folded base title first, then
/// the decoded numeral, so "Show" precedes "Show II" precedes "Show III".
#[must_use]
pub fn series_cmp(a: &Line, b: &Line) -> Ordering {
    let (a_base, a_numeral) = split_series_title(&a.name);
    let (b_base, b_numeral) = split_series_title(&b.name);

    fold_key(&a_base).cmp(&fold_key(&b_base)).then_with(|| {
        roman_to_decimal(a_numeral.as_deref()).cmp(&roman_to_decimal(b_numeral.as_deref()))
    })
}

/// Stable series ordering over a snapshot.
#[must_use]
pub fn series_sorted(lines: &[Line]) -> Vec<Line> {
    let mut out = lines.to_vec();
    out.sort_by(series_cmp);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(id: i32, name: &str) -> Line {
        Line {
            id,
            list_id: 1,
            name: name.to_string(),
            content: "Anime".to_string(),
            status: "Vendo".to_string(),
            opinion: "Bom".to_string(),
            episode: "1".to_string(),
            tags: String::new(),
            image_url: None,
            synopsis: None,
            synonyms: Vec::new(),
            last_highlight: None,
        }
    }

    #[test]
    fn splits_numeral_out_of_title() {
        assert_eq!(
            split_series_title("Overlord II"),
            ("Overlord".to_string(), Some("II".to_string()))
        );
        assert_eq!(split_series_title("Frieren"), ("Frieren".to_string(), None));
    }

    #[test]
    fn long_numerals_are_not_recognized() {
        // XI is outside the recognized range and stays in the base title.
        assert_eq!(split_series_title("Show XI"), ("Show XI".to_string(), None));
    }

    #[test]
    fn numeral_values() {
        assert_eq!(roman_to_decimal(None), -1);
        assert_eq!(roman_to_decimal(Some("I")), 1);
        assert_eq!(roman_to_decimal(Some("X")), 10);
        assert_eq!(roman_to_decimal(Some("XL")), 99);
    }

    #[test]
    fn fold_key_strips_case_and_accents() {
        assert_eq!(fold_key("Ação"), "acao");
        assert_eq!(fold_key("COMÉDIA"), "comedia");
    }

    #[test]
    fn base_title_sorts_before_its_sequels() {
        let lines = vec![
            named(1, "Show III"),
            named(2, "Show"),
            named(3, "Another"),
            named(4, "Show II"),
        ];
        let names: Vec<String> = series_sorted(&lines).into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Another", "Show", "Show II", "Show III"]);
    }
}

//! Spreadsheet export fan-out: every tag of a multi-tag line becomes its own
//! row sharing the line's other columns, and all rows of one line carry the
//! same fill color so the groups read visually in the sheet.

use serde::{Deserialize, Serialize};

use crate::models::Line;

use super::entry::parse_tags;

/// Column toggles for the export dialog. Everything is on by default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportColumns {
    pub id: bool,
    pub name: bool,
    pub synonyms: bool,
    pub tag: bool,
    pub opinion: bool,
    pub episode: bool,
    pub status: bool,
    pub synopsis: bool,
    pub content: bool,
}

impl Default for ExportColumns {
    fn default() -> Self {
        Self {
            id: true,
            name: true,
            synonyms: true,
            tag: true,
            opinion: true,
            episode: true,
            status: true,
            synopsis: true,
            content: true,
        }
    }
}

impl ExportColumns {
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = Vec::new();
        if self.id {
            headers.push("ID");
        }
        if self.name {
            headers.push("Nome");
        }
        if self.synonyms {
            headers.push("Sinonimos");
        }
        if self.tag {
            headers.push("Tag");
        }
        if self.opinion {
            headers.push("Opinião");
        }
        if self.episode {
            headers.push("Ep/Cap");
        }
        if self.status {
            headers.push("Status");
        }
        if self.synopsis {
            headers.push("Sinopse");
        }
        if self.content {
            headers.push("Conteudo");
        }
        headers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    /// RRGGBB fill shared by all rows of one line.
    pub color: String,
    pub cells: Vec<String>,
}

/// Deterministic row-group color for a line id. Channels stay below 200 so
/// dark text remains legible on the fill.
#[must_use]
pub fn row_color(line_id: i32) -> String {
    let mut h = (u64::from(line_id.unsigned_abs())).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;

    let r = (h & 0xFF) % 200;
    let g = ((h >> 8) & 0xFF) % 200;
    let b = ((h >> 16) & 0xFF) % 200;
    format!("{r:02X}{g:02X}{b:02X}")
}

/// One row per tag; lines without tags emit a single row with an empty tag
/// cell. Input order is preserved.
#[must_use]
pub fn build_rows(lines: &[Line], columns: &ExportColumns) -> Vec<ExportRow> {
    let mut rows = Vec::with_capacity(lines.len());

    for line in lines {
        let color = row_color(line.id);
        let mut tags = parse_tags(&line.tags);
        if tags.is_empty() {
            tags.push(String::new());
        }

        for tag in tags {
            let mut cells = Vec::new();
            if columns.id {
                cells.push(line.id.to_string());
            }
            if columns.name {
                cells.push(line.name.clone());
            }
            if columns.synonyms {
                cells.push(line.synonyms.join("; "));
            }
            if columns.tag {
                cells.push(tag);
            }
            if columns.opinion {
                cells.push(line.opinion.clone());
            }
            if columns.episode {
                cells.push(line.episode.clone());
            }
            if columns.status {
                cells.push(line.status.clone());
            }
            if columns.synopsis {
                cells.push(line.synopsis.clone().unwrap_or_default());
            }
            if columns.content {
                cells.push(line.content.clone());
            }
            rows.push(ExportRow {
                color: color.clone(),
                cells,
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i32, name: &str, tags: &str) -> Line {
        Line {
            id,
            list_id: 1,
            name: name.to_string(),
            content: "Manga".to_string(),
            status: "Lendo".to_string(),
            opinion: "Bom".to_string(),
            episode: "40".to_string(),
            tags: tags.to_string(),
            image_url: None,
            synopsis: Some("plot".to_string()),
            synonyms: vec!["Alt".to_string()],
            last_highlight: None,
        }
    }

    #[test]
    fn one_row_per_tag_with_shared_color() {
        let lines = vec![line(7, "Berserk", "Ação,Drama,Gore")];
        let rows = build_rows(&lines, &ExportColumns::default());

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.color == rows[0].color));

        let tag_cells: Vec<&str> = rows.iter().map(|r| r.cells[3].as_str()).collect();
        assert_eq!(tag_cells, vec!["Ação", "Drama", "Gore"]);
        // The other columns repeat per row.
        assert!(rows.iter().all(|r| r.cells[1] == "Berserk"));
    }

    #[test]
    fn untagged_line_emits_one_blank_tag_row() {
        let rows = build_rows(&[line(1, "Frieren", "")], &ExportColumns::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells[3], "");
    }

    #[test]
    fn column_toggles_shrink_rows() {
        let columns = ExportColumns {
            id: false,
            synonyms: false,
            synopsis: false,
            ..ExportColumns::default()
        };
        assert_eq!(
            columns.headers(),
            vec!["Nome", "Tag", "Opinião", "Ep/Cap", "Status", "Conteudo"]
        );

        let rows = build_rows(&[line(1, "Frieren", "Magia")], &columns);
        assert_eq!(rows[0].cells.len(), 6);
        assert_eq!(rows[0].cells[0], "Frieren");
    }

    #[test]
    fn colors_are_deterministic_and_legible() {
        assert_eq!(row_color(42), row_color(42));
        assert_ne!(row_color(1), row_color(2));

        for id in [1, 2, 3, 500, 9999] {
            let color = row_color(id);
            for channel in [0, 2, 4] {
                let value = u8::from_str_radix(&color[channel..channel + 2], 16).unwrap();
                assert!(value < 200, "channel {value:02X} too bright in {color}");
            }
        }
    }
}

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::export::ExportColumns;
use crate::catalog::filter::FilterQuery;
use crate::catalog::navigate::Direction;
use crate::catalog::sort::SortStrategy;
use crate::catalog::{classify, entry};
use crate::constants::icons;
use crate::models::Line;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Line view model: raw fields plus everything the renderer derives from
/// them (class, glyphs, unit label).
#[derive(Debug, Serialize)]
pub struct LineDto {
    pub id: i32,
    pub list_id: i32,
    pub name: String,
    pub content: String,
    pub status: String,
    pub opinion: String,
    pub episode: String,
    pub episode_label: &'static str,
    pub tags: Vec<String>,
    pub extra_class: &'static str,
    pub status_icon: &'static str,
    pub opinion_icon: &'static str,
    pub image_url: Option<String>,
    pub synopsis: Option<String>,
    pub synonyms: Vec<String>,
    pub needs_details: bool,
    pub last_highlight: Option<String>,
}

impl From<Line> for LineDto {
    fn from(line: Line) -> Self {
        Self {
            episode_label: entry::episode_label(&line.content),
            tags: entry::parse_tags(&line.tags),
            extra_class: classify(&line).as_css_class(),
            status_icon: icons::status_icon(&line.status),
            opinion_icon: icons::opinion_icon(&line.opinion),
            needs_details: line.needs_details(),
            id: line.id,
            list_id: line.list_id,
            name: line.name,
            content: line.content,
            status: line.status,
            opinion: line.opinion,
            episode: line.episode,
            image_url: line.image_url,
            synopsis: line.synopsis,
            synonyms: line.synonyms,
            last_highlight: line.last_highlight,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: String,
}

/// Server-side run of the filter + sort pipeline.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub filter: FilterQuery,
    pub sort: Option<SortStrategy>,
}

#[derive(Debug, Deserialize)]
pub struct ImageUpdateRequest {
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailsUpdateRequest {
    #[serde(deserialize_with = "string_or_array")]
    pub synonyms: Vec<String>,
    pub synopsis: String,
}

/// Synonyms historically arrive either as a JSON array or as a
/// JSON-string-encoded array; both normalize to a vector here.
fn string_or_array<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Line::parse_synonyms(Some(&s)),
        other => serde_json::from_value(other).unwrap_or_default(),
    })
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub ids: Vec<i32>,
    pub current: i32,
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
pub struct NavigateDto {
    /// Target line id, or none when the move fell off the grid.
    pub target_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSequenceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSequenceItemRequest {
    pub line_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct ReorderEntry {
    pub line_id: i32,
    pub position: i32,
}

#[derive(Debug, Serialize)]
pub struct SequenceItemDto {
    pub position: i32,
    #[serde(flatten)]
    pub line: LineDto,
}

#[derive(Debug, Serialize)]
pub struct SequenceDetailDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<SequenceItemDto>,
    pub total_items: usize,
}

#[derive(Debug, Serialize)]
pub struct MembershipDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub position: i32,
}

#[derive(Debug, Serialize)]
pub struct LineSequencesDto {
    pub line_id: i32,
    pub line_name: String,
    pub sequences: Vec<MembershipDto>,
    pub total_sequences: usize,
    /// Caption placing the line inside its first sequence, when any.
    pub sequence_note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageSearchDto {
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct DetailsSearchDto {
    pub romaji: String,
    pub english: String,
    pub synonyms: Vec<String>,
    pub synopsis: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub list_id: i32,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub columns: ExportColumns,
    #[serde(default)]
    pub filter: FilterQuery,
    #[serde(default)]
    pub sort: Option<SortStrategy>,
}

#[derive(Debug, Serialize)]
pub struct TagGroupDto {
    pub name: &'static str,
    pub tags: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct TagsDto {
    pub groups: Vec<TagGroupDto>,
    pub all: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub lists: u64,
    pub lines: u64,
    pub database: &'static str,
}

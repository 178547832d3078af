//! AniList GraphQL client for cover and detail lookups.
//!
//! Repeated cover searches for the same query rotate through the result
//! page, so the user can cycle alternatives by asking again.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use anyhow::Result;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::entry::LookupKind;
use crate::constants::limits::LOOKUP_PAGE_SIZE;

const ANILIST_API: &str = "https://graphql.anilist.co";

/// Attempts per detail lookup before giving up on rate limiting.
const DETAIL_RETRIES: u32 = 3;

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    search: &'a str,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<Data>,
}

#[derive(Deserialize)]
struct Data {
    #[serde(rename = "Page")]
    page: Page,
}

#[derive(Deserialize)]
struct Page {
    media: Vec<Media>,
}

#[derive(Deserialize)]
struct Media {
    title: Option<Title>,
    synonyms: Option<Vec<String>>,
    description: Option<String>,
    #[serde(rename = "coverImage")]
    cover_image: Option<CoverImage>,
}

#[derive(Deserialize)]
struct CoverImage {
    large: Option<String>,
}

#[derive(Deserialize)]
struct Title {
    romaji: Option<String>,
    english: Option<String>,
}

/// Alternative titles and synopsis for one media entry.
#[derive(Debug, Clone)]
pub struct MediaDetails {
    pub romaji: String,
    pub english: String,
    pub synonyms: Vec<String>,
    pub synopsis: String,
}

pub struct AnilistClient {
    client: Client,
    cover_rotation: Mutex<HashMap<String, usize>>,
}

impl Default for AnilistClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Strips punctuation the search endpoint chokes on, keeping letters,
/// digits and spaces.
fn clean_query(query: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("invalid query cleanup pattern"));
    re.replace_all(&query.trim().replace('-', " "), "").to_string()
}

fn media_query(kind: LookupKind, fields: &str) -> String {
    let media_type = match kind {
        LookupKind::Anime => "ANIME",
        LookupKind::Manga => "MANGA",
    };
    format!(
        "query($search: String) {{\n  Page(page: 1, perPage: {LOOKUP_PAGE_SIZE}) {{\n    media(search: $search, type: {media_type}) {{\n{fields}\n    }}\n  }}\n}}"
    )
}

impl AnilistClient {
    #[must_use]
    pub fn new() -> Self {
        Self::with_shared_client(
            Client::builder()
                .user_agent("Listarr/1.0")
                .build()
                .unwrap_or_else(|_| Client::new()),
        )
    }

    #[must_use]
    pub fn with_shared_client(client: Client) -> Self {
        Self {
            client,
            cover_rotation: Mutex::new(HashMap::new()),
        }
    }

    async fn search_media(&self, query: &str, gql: &str) -> Result<Vec<Media>> {
        let request_body = GraphQLRequest {
            query: gql,
            variables: Variables { search: query },
        };

        let response: GraphQLResponse = self
            .client
            .post(ANILIST_API)
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.data.map(|d| d.page.media).unwrap_or_default())
    }

    /// Resolves the next cover candidate for `query`, cycling through the
    /// result page on repeated calls with the same query.
    pub async fn next_cover(&self, query: &str, kind: LookupKind) -> Result<Option<String>> {
        let clean = clean_query(query);
        let gql = media_query(kind, "      coverImage { large }");

        let covers: Vec<String> = self
            .search_media(&clean, &gql)
            .await?
            .into_iter()
            .filter_map(|m| m.cover_image.and_then(|c| c.large))
            .map(|url| url.trim().to_string())
            .collect();

        if covers.is_empty() {
            debug!("No {} cover found for '{}'", kind, clean);
            return Ok(None);
        }

        let chosen = {
            let mut rotation = self
                .cover_rotation
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let key = format!("{kind}:{clean}");
            let next = rotation
                .get(&key)
                .map_or(0, |last| (last + 1) % covers.len());
            rotation.insert(key, next);
            next
        };

        debug!("Cover for '{}' (candidate {}): {}", clean, chosen, covers[chosen]);
        Ok(Some(covers[chosen].clone()))
    }

    /// Fetches alternative titles and the synopsis, retrying with a growing
    /// pause when AniList rate-limits the call.
    pub async fn fetch_details(
        &self,
        query: &str,
        kind: LookupKind,
    ) -> Result<Option<MediaDetails>> {
        let clean = clean_query(query);
        let gql = media_query(
            kind,
            "      title { romaji english }\n      synonyms\n      description",
        );

        let request_body = GraphQLRequest {
            query: &gql,
            variables: Variables { search: &clean },
        };

        for attempt in 1..=DETAIL_RETRIES {
            let response = self
                .client
                .post(ANILIST_API)
                .json(&request_body)
                .send()
                .await?;

            if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let wait = std::time::Duration::from_secs(u64::from(10 * attempt));
                warn!(
                    "AniList rate limited (attempt {}/{}), waiting {:?}",
                    attempt, DETAIL_RETRIES, wait
                );
                tokio::time::sleep(wait).await;
                continue;
            }

            let parsed: GraphQLResponse = response.error_for_status()?.json().await?;
            let Some(first) = parsed
                .data
                .map(|d| d.page.media)
                .unwrap_or_default()
                .into_iter()
                .next()
            else {
                return Ok(None);
            };

            return Ok(Some(Self::map_details(first)));
        }

        anyhow::bail!("AniList lookup for '{clean}' failed after {DETAIL_RETRIES} attempts")
    }

    fn map_details(media: Media) -> MediaDetails {
        let title = media.title.unwrap_or(Title {
            romaji: None,
            english: None,
        });
        let romaji = title.romaji.unwrap_or_default();
        let english = title.english.unwrap_or_default();

        let mut synonyms = Vec::new();
        if !romaji.is_empty() {
            synonyms.push(romaji.clone());
        }
        if !english.is_empty() {
            synonyms.push(english.clone());
        }
        synonyms.extend(
            media
                .synonyms
                .unwrap_or_default()
                .into_iter()
                .take(2)
                .filter(|s| !s.is_empty()),
        );

        let synopsis = media
            .description
            .map(|html| flatten_html(&html))
            .unwrap_or_default();

        MediaDetails {
            romaji,
            english,
            synonyms,
            synopsis,
        }
    }
}

/// AniList descriptions arrive as HTML; store them as plain text.
fn flatten_html(html: &str) -> String {
    html2text::from_read(html.as_bytes(), 10_000)
        .map(|text| text.trim().to_string())
        .unwrap_or_else(|_| html.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_cleanup_keeps_words_and_spaces() {
        assert_eq!(clean_query("  Re:Zero - Starting Life  "), "ReZero   Starting Life");
        assert_eq!(clean_query("Frieren!?"), "Frieren");
    }

    #[test]
    fn media_query_embeds_type_and_page_size() {
        let q = media_query(LookupKind::Manga, "      synonyms");
        assert!(q.contains("type: MANGA"));
        assert!(q.contains("perPage: 5"));
    }

    #[test]
    fn html_descriptions_are_flattened() {
        let text = flatten_html("A hero<br>rises <i>again</i>.");
        assert!(text.contains("A hero"));
        assert!(!text.contains('<'));
    }
}

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, DetailsSearchDto};
use crate::api::validation::validate_search_query;
use crate::catalog::entry::LookupKind;
use crate::services::RefreshStats;

#[derive(Deserialize)]
pub struct DetailsSearchQuery {
    pub q: String,
    #[serde(default)]
    pub kind: Option<String>,
}

/// Synonyms + synopsis lookup. 404 when the catalog knows nothing under
/// the cleaned-up query.
pub async fn search_details(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DetailsSearchQuery>,
) -> Result<Json<ApiResponse<DetailsSearchDto>>, ApiError> {
    let query = validate_search_query(&params.q)?;
    let kind = params
        .kind
        .as_deref()
        .map_or(Ok(LookupKind::Anime), |s| {
            s.parse().map_err(ApiError::validation)
        })?;

    let details = state
        .shared
        .anilist
        .fetch_details(query, kind)
        .await
        .map_err(|e| ApiError::anilist_error(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("No media found for '{query}'")))?;

    Ok(Json(ApiResponse::success(DetailsSearchDto {
        romaji: details.romaji,
        english: details.english,
        synonyms: details.synonyms,
        synopsis: details.synopsis,
    })))
}

pub async fn refresh_details(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RefreshStats>>, ApiError> {
    let stats = state.shared.enrichment.refresh_details().await?;
    Ok(Json(ApiResponse::success(stats)))
}

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LineDto};
use crate::api::validation::validate_id;
use crate::catalog::filter::{self, FilterQuery};
use crate::catalog::title::fold_key;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HighlightsQuery {
    /// Same censor semantics as the main filter: false hides
    /// adult-classified manhwa entries.
    pub censor_adult: bool,
}

/// Lines the user is actively following that have not been verified within
/// the cool-down window, ordered by name.
pub async fn list_highlights(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
    Query(params): Query<HighlightsQuery>,
) -> Result<Json<ApiResponse<Vec<LineDto>>>, ApiError> {
    validate_id(list_id)?;
    if !state.store().list_exists(list_id).await? {
        return Err(ApiError::list_not_found(list_id));
    }

    let cooldown_days = state.config().read().await.catalog.highlight_cooldown_days;
    let cutoff = (chrono::Utc::now() - chrono::Duration::days(i64::from(cooldown_days)))
        .to_rfc3339();

    let mut pending = state.store().pending_review(list_id, &cutoff).await?;

    let censor_query = FilterQuery {
        censor_adult: params.censor_adult,
        ..FilterQuery::default()
    };
    pending.retain(|line| filter::matches(line, &censor_query));
    pending.sort_by_cached_key(|line| fold_key(&line.name));

    Ok(Json(ApiResponse::success(
        pending.into_iter().map(LineDto::from).collect(),
    )))
}

/// Stamps the line as manually verified, restarting its cool-down.
pub async fn mark_verified(
    State(state): State<Arc<AppState>>,
    Path(line_id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(line_id)?;
    let now = chrono::Utc::now().to_rfc3339();
    if !state.store().mark_highlighted(line_id, &now).await? {
        return Err(ApiError::line_not_found(line_id));
    }
    Ok(Json(ApiResponse::success(())))
}

use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, SystemStatus, TagGroupDto, TagsDto};
use crate::constants::tags;

pub async fn get_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatus>>, ApiError> {
    let database = match state.store().ping().await {
        Ok(()) => "ok",
        Err(_) => "error",
    };

    Ok(Json(ApiResponse::success(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        lists: state.store().count_lists().await.unwrap_or(0),
        lines: state.store().count_lines().await.unwrap_or(0),
        database,
    })))
}

/// The curated tag vocabulary, grouped for the entry form plus a flattened
/// sorted view for the filter panel.
pub async fn get_tags() -> Json<ApiResponse<TagsDto>> {
    let groups = tags::TAG_GROUPS
        .iter()
        .copied()
        .map(|(name, tags)| TagGroupDto {
            name,
            tags: tags.to_vec(),
        })
        .collect();

    Json(ApiResponse::success(TagsDto {
        groups,
        all: tags::all_tags(),
    }))
}

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CreateListRequest, LineDto, QueryRequest};
use crate::api::validation::{validate_id, validate_name};
use crate::catalog::{filter, sort, title};
use crate::models::List;

pub async fn list_lists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<List>>>, ApiError> {
    let lists = state.store().list_lists().await?;
    Ok(Json(ApiResponse::success(lists)))
}

pub async fn create_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateListRequest>,
) -> Result<Json<ApiResponse<List>>, ApiError> {
    let name = validate_name(&req.name)?;
    let list = state.store().add_list(name).await?;
    Ok(Json(ApiResponse::success(list)))
}

/// All lines of a list in series order: base title first, then the Roman
/// numeral, so a show precedes its numbered sequels.
pub async fn list_lines(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<LineDto>>>, ApiError> {
    validate_id(id)?;
    if !state.store().list_exists(id).await? {
        return Err(ApiError::list_not_found(id));
    }

    let lines = state.store().lines_for_list(id).await?;
    let ordered = title::series_sorted(&lines);

    Ok(Json(ApiResponse::success(
        ordered.into_iter().map(LineDto::from).collect(),
    )))
}

/// Runs the catalog pipeline server-side: series order, then the filter
/// query, then the requested ordering.
pub async fn query_lines(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<ApiResponse<Vec<LineDto>>>, ApiError> {
    validate_id(id)?;
    if !state.store().list_exists(id).await? {
        return Err(ApiError::list_not_found(id));
    }

    let lines = state.store().lines_for_list(id).await?;
    let mut visible = filter::filter(&title::series_sorted(&lines), &req.filter);
    if let Some(strategy) = req.sort {
        visible = sort::sort(&visible, strategy);
    }

    Ok(Json(ApiResponse::success(
        visible.into_iter().map(LineDto::from).collect(),
    )))
}

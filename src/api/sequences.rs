use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{
    AddSequenceItemRequest, ApiError, ApiResponse, AppState, CreateSequenceRequest, LineDto,
    ReorderEntry, SequenceDetailDto, SequenceItemDto,
};
use crate::api::validation::{validate_id, validate_name};
use crate::models::sequence::{Sequence, SequenceSummary};

pub async fn create_sequence(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSequenceRequest>,
) -> Result<Json<ApiResponse<Sequence>>, ApiError> {
    let name = validate_name(&req.name)?;
    let sequence = state
        .store()
        .create_sequence(name, req.description.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(sequence)))
}

pub async fn list_sequences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SequenceSummary>>>, ApiError> {
    let summaries = state.store().sequence_summaries().await?;
    Ok(Json(ApiResponse::success(summaries)))
}

pub async fn get_sequence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<SequenceDetailDto>>, ApiError> {
    validate_id(id)?;
    let sequence = state
        .store()
        .get_sequence(id)
        .await?
        .ok_or_else(|| ApiError::sequence_not_found(id))?;

    let items = state.store().sequence_items(id).await?;
    let items: Vec<SequenceItemDto> = items
        .into_iter()
        .map(|item| SequenceItemDto {
            position: item.position,
            line: LineDto::from(item.line),
        })
        .collect();

    let total_items = items.len();
    Ok(Json(ApiResponse::success(SequenceDetailDto {
        id: sequence.id,
        name: sequence.name,
        description: sequence.description,
        items,
        total_items,
    })))
}

pub async fn delete_sequence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(id)?;
    if !state.store().delete_sequence(id).await? {
        return Err(ApiError::sequence_not_found(id));
    }
    Ok(Json(ApiResponse::success(())))
}

#[derive(Debug, serde::Serialize)]
pub struct AddedItemDto {
    pub sequence_id: i32,
    pub line_id: i32,
    pub position: i32,
}

/// Appends a line to the sequence; the position is assigned server-side.
pub async fn add_sequence_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<AddSequenceItemRequest>,
) -> Result<Json<ApiResponse<AddedItemDto>>, ApiError> {
    validate_id(id)?;
    validate_id(req.line_id)?;

    if state.store().get_sequence(id).await?.is_none() {
        return Err(ApiError::sequence_not_found(id));
    }
    if state.store().get_line(req.line_id).await?.is_none() {
        return Err(ApiError::line_not_found(req.line_id));
    }
    if state.store().sequence_contains(id, req.line_id).await? {
        return Err(ApiError::conflict("Line is already in this sequence"));
    }

    let position = state.store().append_sequence_item(id, req.line_id).await?;
    Ok(Json(ApiResponse::success(AddedItemDto {
        sequence_id: id,
        line_id: req.line_id,
        position,
    })))
}

pub async fn remove_sequence_item(
    State(state): State<Arc<AppState>>,
    Path((id, line_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(id)?;
    validate_id(line_id)?;

    if !state.store().remove_sequence_item(id, line_id).await? {
        return Err(ApiError::NotFound(format!(
            "Line {} is not in sequence {}",
            line_id, id
        )));
    }
    Ok(Json(ApiResponse::success(())))
}

/// Bulk position update; atomic across the whole payload.
pub async fn reorder_sequence(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(entries): Json<Vec<ReorderEntry>>,
) -> Result<Json<ApiResponse<usize>>, ApiError> {
    validate_id(id)?;
    if entries.is_empty() {
        return Err(ApiError::validation("Reorder payload cannot be empty"));
    }

    if state.store().get_sequence(id).await?.is_none() {
        return Err(ApiError::sequence_not_found(id));
    }

    let positions: Vec<(i32, i32)> = entries
        .iter()
        .map(|entry| (entry.line_id, entry.position))
        .collect();

    match state.store().reorder_sequence(id, &positions).await? {
        Ok(()) => Ok(Json(ApiResponse::success(entries.len()))),
        Err(line_id) => Err(ApiError::NotFound(format!(
            "Line {} is not in sequence {}",
            line_id, id
        ))),
    }
}

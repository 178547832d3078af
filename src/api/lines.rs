use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use tracing::warn;

use super::{
    ApiError, ApiResponse, AppState, DetailsUpdateRequest, ImageUpdateRequest, LineDto,
    LineSequencesDto, MembershipDto, NavigateDto, NavigateRequest,
};
use crate::api::validation::{validate_id, validate_name};
use crate::catalog::navigate::{NavContext, SequencePosition};
use crate::constants::images::is_placeholder;
use crate::models::line::{LineUpdate, NewLine};

pub async fn create_line(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewLine>,
) -> Result<Json<ApiResponse<LineDto>>, ApiError> {
    validate_name(&req.name)?;
    validate_id(req.list_id)?;
    if !state.store().list_exists(req.list_id).await? {
        return Err(ApiError::list_not_found(req.list_id));
    }

    let line = state.store().add_line(&req).await?;

    // Best-effort enrichment; a failed lookup never fails the create.
    if state.config().read().await.catalog.enrich_on_create {
        if let Err(e) = state.shared.enrichment.repair_line(&line).await {
            warn!("Enrichment after create failed for {}: {}", line.name, e);
        }
    }

    let line = state
        .store()
        .get_line(line.id)
        .await?
        .ok_or_else(|| ApiError::line_not_found(line.id))?;
    Ok(Json(ApiResponse::success(LineDto::from(line))))
}

pub async fn update_line(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<LineUpdate>,
) -> Result<Json<ApiResponse<LineDto>>, ApiError> {
    validate_id(id)?;
    validate_name(&req.name)?;

    if !state.store().update_line(id, &req).await? {
        return Err(ApiError::line_not_found(id));
    }

    let line = state
        .store()
        .get_line(id)
        .await?
        .ok_or_else(|| ApiError::line_not_found(id))?;
    Ok(Json(ApiResponse::success(LineDto::from(line))))
}

pub async fn delete_line(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(id)?;
    if !state.store().remove_line(id).await? {
        return Err(ApiError::line_not_found(id));
    }
    Ok(Json(ApiResponse::success(())))
}

/// Narrow cover update. The unresolved sentinel is not a real URL and is
/// rejected rather than persisted.
pub async fn update_line_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<ImageUpdateRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(id)?;
    let url = req.image_url.trim();
    if url.is_empty() {
        return Err(ApiError::validation("image_url is required"));
    }
    if is_placeholder(url) {
        return Err(ApiError::validation(
            "Refusing to store the placeholder image as a resolved cover",
        ));
    }

    if !state.store().update_line_image(id, url).await? {
        return Err(ApiError::line_not_found(id));
    }
    Ok(Json(ApiResponse::success(())))
}

pub async fn update_line_details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<DetailsUpdateRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    validate_id(id)?;
    if !state
        .store()
        .update_line_details(id, &req.synonyms, &req.synopsis)
        .await?
    {
        return Err(ApiError::line_not_found(id));
    }
    Ok(Json(ApiResponse::success(())))
}

/// Sequences the line belongs to, plus the caption placing it inside the
/// first one. A sequence lookup problem degrades to "no sequence info".
pub async fn line_sequences(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<LineSequencesDto>>, ApiError> {
    validate_id(id)?;
    let line = state
        .store()
        .get_line(id)
        .await?
        .ok_or_else(|| ApiError::line_not_found(id))?;

    let memberships = state.store().sequences_for_line(id).await?;

    let sequence_note = match memberships.first() {
        Some((sequence, _)) => match state.store().sequence_items(sequence.id).await {
            Ok(items) => {
                let named: Vec<(i32, String)> = items
                    .iter()
                    .map(|item| (item.line.id, item.line.name.clone()))
                    .collect();
                let position = SequencePosition::locate(&named, id);
                (position != SequencePosition::Alone).then(|| position.to_string())
            }
            Err(e) => {
                warn!("Sequence lookup failed for line {}: {}", id, e);
                None
            }
        },
        None => None,
    };

    let total_sequences = memberships.len();
    Ok(Json(ApiResponse::success(LineSequencesDto {
        line_id: id,
        line_name: line.name,
        sequences: memberships
            .into_iter()
            .map(|(sequence, position)| MembershipDto {
                id: sequence.id,
                name: sequence.name,
                description: sequence.description,
                position,
            })
            .collect(),
        total_sequences,
        sequence_note,
    })))
}

/// Maps a grid arrow to the next line id within the caller's context list.
/// Off-grid moves come back empty instead of wrapping.
pub async fn navigate(
    Json(req): Json<NavigateRequest>,
) -> Result<Json<ApiResponse<NavigateDto>>, ApiError> {
    let mut nav = NavContext::new(req.ids, req.current);
    let target_id = nav.go(req.direction);
    Ok(Json(ApiResponse::success(NavigateDto { target_id })))
}

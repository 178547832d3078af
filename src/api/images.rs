use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{HeaderValue, StatusCode, header},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, ApiResponse, AppState, ImageSearchDto};
use crate::api::validation::validate_search_query;
use crate::catalog::entry::LookupKind;
use crate::constants::images::PLACEHOLDER_COVER;
use crate::services::RefreshStats;

#[derive(Deserialize)]
pub struct ImageSearchQuery {
    pub q: String,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

fn lookup_kind(raw: Option<&str>) -> Result<LookupKind, ApiError> {
    raw.map_or(Ok(LookupKind::Anime), |s| {
        s.parse().map_err(ApiError::validation)
    })
}

/// Cover lookup with per-query rotation. Lookup failures degrade to the
/// placeholder sentinel so the caller always gets a usable URL.
pub async fn search_image(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImageSearchQuery>,
) -> Result<Json<ApiResponse<ImageSearchDto>>, ApiError> {
    let query = validate_search_query(&params.q)?;
    let kind = lookup_kind(params.kind.as_deref())?;

    let image_url = match state.shared.anilist.next_cover(query, kind).await {
        Ok(Some(url)) => url,
        Ok(None) => PLACEHOLDER_COVER.to_string(),
        Err(e) => {
            warn!("Cover lookup failed for '{}': {}", query, e);
            PLACEHOLDER_COVER.to_string()
        }
    };

    Ok(Json(ApiResponse::success(ImageSearchDto { image_url })))
}

/// Fetches a remote image and relays it with permissive CORS, so covers
/// from foreign hosts render on the canvas-based card exporter.
pub async fn proxy_image(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyQuery>,
) -> Result<Response, ApiError> {
    let url = validate_search_query(&params.url)?;

    let upstream = state
        .shared
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::anilist_error(format!("image fetch failed: {e}")))?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ApiError::anilist_error(format!("image read failed: {e}")))?;

    let mut response = Response::builder()
        .status(status)
        .body(Body::from(bytes))
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    Ok(response)
}

pub async fn refresh_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<RefreshStats>>, ApiError> {
    let stats = state.shared.enrichment.refresh_images().await?;
    Ok(Json(ApiResponse::success(stats)))
}

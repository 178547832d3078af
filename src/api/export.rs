use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderValue, header},
    response::Response,
};
use std::sync::Arc;

use super::{ApiError, AppState, ExportRequest};
use crate::api::validation::validate_id;
use crate::catalog::export::build_rows;
use crate::catalog::{filter, sort, title};
use crate::services::render_workbook;

/// Applies the catalog pipeline to the list, fans the result out to one
/// row per tag and streams back a spreadsheet attachment.
pub async fn export_list(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    validate_id(req.list_id)?;
    if !state.store().list_exists(req.list_id).await? {
        return Err(ApiError::list_not_found(req.list_id));
    }

    let lines = state.store().lines_for_list(req.list_id).await?;
    let mut visible = filter::filter(&title::series_sorted(&lines), &req.filter);
    if let Some(strategy) = req.sort {
        visible = sort::sort(&visible, strategy);
    }

    let rows = build_rows(&visible, &req.columns);
    let workbook = render_workbook(&req.columns.headers(), &rows).map_err(ApiError::from)?;

    let filename = match req.filename.filter(|name| !name.trim().is_empty()) {
        Some(name) => name,
        None => state.config().read().await.catalog.export_filename.clone(),
    };
    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));

    let mut response = Response::builder()
        .body(Body::from(workbook))
        .map_err(|e| ApiError::InternalError(e.to_string()))?;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/vnd.ms-excel"),
    );
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    Ok(response)
}

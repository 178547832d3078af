use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod details;
mod error;
mod export;
mod highlights;
mod images;
mod lines;
mod lists;
mod observability;
mod sequences;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

pub async fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    Ok(Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle).await
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (static_path, cors_origins) = {
        let config = state.config().read().await;
        (
            config.general.static_path.clone(),
            config.server.cors_allowed_origins.clone(),
        )
    };

    let api_router = Router::new()
        .route("/lists", get(lists::list_lists))
        .route("/lists", post(lists::create_list))
        .route("/lists/{id}/lines", get(lists::list_lines))
        .route("/lists/{id}/lines/query", post(lists::query_lines))
        .route("/lists/{id}/highlights", get(highlights::list_highlights))
        .route("/lines", post(lines::create_line))
        .route("/lines/navigate", post(lines::navigate))
        .route("/lines/{id}", put(lines::update_line))
        .route("/lines/{id}", delete(lines::delete_line))
        .route("/lines/{id}/image", put(lines::update_line_image))
        .route("/lines/{id}/details", put(lines::update_line_details))
        .route("/lines/{id}/sequences", get(lines::line_sequences))
        .route("/lines/{id}/verified", post(highlights::mark_verified))
        .route("/images/search", get(images::search_image))
        .route("/images/proxy", get(images::proxy_image))
        .route("/images/refresh", post(images::refresh_images))
        .route("/details/search", get(details::search_details))
        .route("/details/refresh", post(details::refresh_details))
        .route("/sequences", get(sequences::list_sequences))
        .route("/sequences", post(sequences::create_sequence))
        .route("/sequences/{id}", get(sequences::get_sequence))
        .route("/sequences/{id}", delete(sequences::delete_sequence))
        .route("/sequences/{id}/items", post(sequences::add_sequence_item))
        .route(
            "/sequences/{id}/items/{line_id}",
            delete(sequences::remove_sequence_item),
        )
        .route("/sequences/{id}/order", put(sequences::reorder_sequence))
        .route("/export", post(export::export_list))
        .route("/tags", get(system::get_tags))
        .route("/system/status", get(system::get_status))
        .route("/metrics", get(observability::get_metrics))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .fallback_service(tower_http::services::ServeDir::new(static_path))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

use axum::Router;

use backend_application::AppState;

use crate::handlers::{config_handlers, ops_handlers, page_handlers, stream_handlers};

pub const ROUTE_TABLE: &[&str] = &[
    "GET /api/pages",
    "GET /api/pages/:page_id",
    "POST /api/pages/:page_id",
    "GET /api/config",
    "POST /api/config",
    "POST /api/reset",
    "GET /api/ops/health",
    "GET /api/ops/metrics",
    "GET /ws?pageId=...",
];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pages", axum::routing::get(page_handlers::list_pages))
        .route(
            "/api/pages/",
            axum::routing::post(page_handlers::update_page_without_id),
        )
        .route(
            "/api/pages/:page_id",
            axum::routing::get(page_handlers::get_page).post(page_handlers::update_page),
        )
        .route(
            "/api/config",
            axum::routing::get(config_handlers::get_global_config)
                .post(config_handlers::update_global_config),
        )
        .route(
            "/api/reset",
            axum::routing::post(config_handlers::reset_global_config),
        )
        .route(
            "/api/ops/health",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/api/ops/metrics",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .route("/ws", axum::routing::get(stream_handlers::subscribe))
        .with_state(state)
}

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;

use backend_application::AppState;

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let live_connections = state.subscription_hub.connection_count().await;
    let pages = state.page_registry.page_count().await;
    let payload = state.metrics.render_prometheus(live_connections, pages);
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload)
}

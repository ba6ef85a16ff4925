use backend_domain::{build_view_for, ViewSink};
use tracing::{debug, info};

use crate::ops::ConnectionId;
use crate::{AppError, AppState};

/// Validates the page id a subscriber asked for. Runs before the upgrade so
/// a rejected request never reaches the hub.
pub fn require_page_id(page_id: Option<String>) -> Result<String, AppError> {
    match page_id {
        Some(page_id) if !page_id.is_empty() => Ok(page_id),
        _ => Err(AppError::BadRequest("pageId is required".to_string())),
    }
}

/// Registers a new connection and, when the page already has a record,
/// sends it a snapshot. Pages without a record get nothing until the next
/// broadcast.
pub async fn connect_subscriber(
    state: &AppState,
    page_id: &str,
    sink: Box<dyn ViewSink>,
) -> ConnectionId {
    let id = state.subscription_hub.register(page_id, sink).await;
    state.metrics.record_subscription();
    info!("subscriber connected: id={}, page_id={}", id, page_id);

    let Some(page) = state.page_registry.get(page_id).await else {
        debug!("no record yet for page {}, waiting for updates", page_id);
        return id;
    };
    let view = build_view_for(&page.config);
    if !state.subscription_hub.send_to(id, &view).await {
        state.metrics.record_dropped_connection();
    }
    id
}

pub async fn disconnect_subscriber(state: &AppState, id: ConnectionId) {
    if state.subscription_hub.unregister(id).await {
        info!("subscriber disconnected: id={}", id);
    }
}

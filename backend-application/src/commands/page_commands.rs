use backend_domain::{build_view_for, PageRecord};
use tracing::info;

use crate::{AppError, AppState};

/// Stores a full page record under `page_id` and pushes the stored record to
/// that page's subscribers.
pub async fn upsert_page(
    state: &AppState,
    page_id: &str,
    record: PageRecord,
) -> Result<PageRecord, AppError> {
    if page_id.is_empty() {
        return Err(AppError::BadRequest("pageId is required".to_string()));
    }

    let stored = state.page_registry.upsert(page_id, record).await;
    let view = build_view_for(&stored.config);
    let outcome = state.subscription_hub.broadcast(&view, page_id).await;
    state.metrics.record_broadcast(outcome);
    info!(
        "page updated: page_id={}, delivered={}, dropped={}",
        page_id, outcome.delivered, outcome.dropped
    );
    Ok(stored)
}

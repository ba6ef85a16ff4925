use backend_domain::{PageRecord, PageSummary};

use crate::{AppError, AppState};

pub async fn list_pages(state: &AppState) -> Vec<PageSummary> {
    state.page_registry.list().await
}

pub async fn get_page(state: &AppState, page_id: &str) -> Result<PageRecord, AppError> {
    state
        .page_registry
        .get(page_id)
        .await
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))
}

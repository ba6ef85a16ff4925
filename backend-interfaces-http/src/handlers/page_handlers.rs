use axum::extract::{Path, State};
use axum::Json;
use tracing::warn;

use backend_application::commands::page_commands;
use backend_application::queries::page_queries;
use backend_application::AppState;
use backend_domain::{PageRecord, PageSummary};

use crate::error::HttpError;
use crate::handlers::StatusAck;

pub async fn list_pages(State(state): State<AppState>) -> Json<Vec<PageSummary>> {
    Json(page_queries::list_pages(&state).await)
}

pub async fn get_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
) -> Result<Json<PageRecord>, HttpError> {
    let page = page_queries::get_page(&state, &page_id).await?;
    Ok(Json(page))
}

pub async fn update_page(
    State(state): State<AppState>,
    Path(page_id): Path<String>,
    body: axum::body::Bytes,
) -> Result<Json<StatusAck>, HttpError> {
    let record: PageRecord = serde_json::from_slice(&body).map_err(|err| {
        warn!("failed to parse page body for {}: {}", page_id, err);
        HttpError::BadRequest("Invalid request body".to_string())
    })?;
    let stored = page_commands::upsert_page(&state, &page_id, record).await?;
    Ok(Json(StatusAck {
        status: "updated",
        page_id: Some(stored.page_id),
    }))
}

/// POST /api/pages/ with an empty id segment.
pub async fn update_page_without_id() -> HttpError {
    HttpError::BadRequest("pageId is required".to_string())
}

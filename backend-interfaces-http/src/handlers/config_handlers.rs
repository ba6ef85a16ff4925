use axum::extract::State;
use axum::Json;
use tracing::warn;

use backend_application::commands::config_commands;
use backend_application::queries::config_queries;
use backend_application::AppState;
use backend_domain::SharedConfig;

use crate::error::HttpError;
use crate::handlers::StatusAck;

pub async fn get_global_config(State(state): State<AppState>) -> Json<SharedConfig> {
    Json(config_queries::get_global_config(&state).await)
}

pub async fn update_global_config(
    State(state): State<AppState>,
    body: axum::body::Bytes,
) -> Result<Json<StatusAck>, HttpError> {
    let update: SharedConfig = serde_json::from_slice(&body).map_err(|err| {
        warn!("failed to parse config update body: {}", err);
        HttpError::BadRequest("Invalid request body".to_string())
    })?;
    config_commands::update_global_config(&state, update).await;
    Ok(Json(StatusAck::new("updated")))
}

pub async fn reset_global_config(State(state): State<AppState>) -> Json<StatusAck> {
    config_commands::reset_global_config(&state).await;
    Json(StatusAck::new("reset"))
}

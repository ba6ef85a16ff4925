use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::Response;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{info, warn};

use backend_application::commands::subscription_commands;
use backend_application::AppState;
use backend_domain::ViewSink;

use crate::error::HttpError;

#[derive(Debug, Deserialize)]
pub struct SubscribeQuery {
    #[serde(rename = "pageId")]
    pub page_id: Option<String>,
}

/// Write half of an upgraded socket, owned by the subscription hub.
pub struct WsViewSink {
    sender: SplitSink<WebSocket, Message>,
}

impl WsViewSink {
    pub fn new(sender: SplitSink<WebSocket, Message>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl ViewSink for WsViewSink {
    async fn send_text(&mut self, payload: String) -> anyhow::Result<()> {
        self.sender.send(Message::Text(payload)).await?;
        Ok(())
    }

    async fn close(&mut self) {
        let _ = self.sender.close().await;
    }
}

/// GET /ws?pageId=...
///
/// The page id and origin are checked before upgrading, so a rejected
/// request is never registered. The upgrade is extracted optionally so a
/// missing page id is reported even on a plain GET.
pub async fn subscribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SubscribeQuery>,
    ws: Option<WebSocketUpgrade>,
) -> Result<Response, HttpError> {
    let page_id = subscription_commands::require_page_id(query.page_id)?;
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());
    if !state.config.is_origin_allowed(origin) {
        warn!(
            "websocket origin rejected: page_id={}, origin={:?}",
            page_id, origin
        );
        return Err(HttpError::Forbidden("Origin not allowed".to_string()));
    }

    let Some(ws) = ws else {
        return Err(HttpError::BadRequest(
            "WebSocket upgrade required".to_string(),
        ));
    };

    info!("websocket connection requested: page_id={}", page_id);
    Ok(ws.on_upgrade(move |socket| run_subscription(socket, state, page_id)))
}

// The read half only detects disconnects; inbound frames are ignored.
async fn run_subscription(socket: WebSocket, state: AppState, page_id: String) {
    let (sender, mut receiver) = socket.split();
    let id = subscription_commands::connect_subscriber(
        &state,
        &page_id,
        Box::new(WsViewSink::new(sender)),
    )
    .await;

    while let Some(frame) = receiver.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                warn!("websocket read failed: id={}, err={}", id, err);
                break;
            }
        }
    }

    subscription_commands::disconnect_subscriber(&state, id).await;
}

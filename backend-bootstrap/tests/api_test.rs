//! End-to-end tests: real router on a random port, driven over HTTP and WebSocket.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::StreamExt;
use serde_json::{json, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use backend_application::AppState;
use backend_domain::{RuntimeConfig, ViewModel};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_test_server() -> (SocketAddr, AppState) {
    start_test_server_with(RuntimeConfig::default()).await
}

async fn start_test_server_with(config: RuntimeConfig) -> (SocketAddr, AppState) {
    let state = AppState::new(config);
    let app = backend_bootstrap::build_app(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (addr, state)
}

async fn subscribe(addr: SocketAddr, state: &AppState, page_id: &str) -> WsClient {
    let request = format!("ws://{addr}/ws?pageId={page_id}")
        .into_client_request()
        .expect("ws request");
    subscribe_with(state, request).await
}

async fn subscribe_with(state: &AppState, request: Request) -> WsClient {
    let before = state.subscription_hub.connection_count().await;
    let (ws, _) = tokio_tungstenite::connect_async(request)
        .await
        .expect("websocket connect");
    wait_for_subscribers(state, before + 1).await;
    ws
}

/// Registration happens after the 101 response, so poll until the hub sees it.
async fn wait_for_subscribers(state: &AppState, expected: usize) {
    for _ in 0..100 {
        if state.subscription_hub.connection_count().await == expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {expected} subscribers");
}

async fn next_view(ws: &mut WsClient) -> ViewModel {
    let frame = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("view within timeout")
        .expect("stream open")
        .expect("frame");
    match frame {
        Message::Text(text) => serde_json::from_str(&text).expect("view json"),
        other => panic!("unexpected frame: {other:?}"),
    }
}

async fn assert_silent(ws: &mut WsClient) {
    let result = tokio::time::timeout(Duration::from_millis(300), ws.next()).await;
    assert!(result.is_err(), "expected no frame, got {result:?}");
}

#[tokio::test]
async fn upsert_substitutes_defaults_and_get_returns_stored_record() {
    let (addr, _state) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/api/pages/alice"))
        .json(&json!({
            "displayName": "Alice",
            "config": {"message": "Hi", "color": "", "theme": ""}
        }))
        .send()
        .await
        .expect("post page");
    assert_eq!(resp.status(), 200);
    let ack: Value = resp.json().await.expect("ack json");
    assert_eq!(ack, json!({"status": "updated", "pageId": "alice"}));

    let page: Value = client
        .get(format!("http://{addr}/api/pages/alice"))
        .send()
        .await
        .expect("get page")
        .json()
        .await
        .expect("page json");
    assert_eq!(page["pageId"], "alice");
    assert_eq!(page["displayName"], "Alice");
    assert_eq!(page["config"]["message"], "Hi");
    assert_eq!(page["config"]["color"], "#ffffff");
    assert_eq!(page["config"]["theme"], "light");

    let pages: Value = client
        .get(format!("http://{addr}/api/pages"))
        .send()
        .await
        .expect("list pages")
        .json()
        .await
        .expect("pages json");
    assert_eq!(pages, json!([{"pageId": "alice", "displayName": "Alice"}]));
}

#[tokio::test]
async fn page_update_reaches_only_that_page() {
    let (addr, state) = start_test_server().await;
    let mut team = subscribe(addr, &state, "team").await;
    let mut solo = subscribe(addr, &state, "solo").await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/pages/team"))
        .json(&json!({
            "displayName": "Team",
            "config": {
                "message": "Standup in 5",
                "color": "#336699",
                "theme": "dark",
                "chatPartner": {"name": "Bot", "status": "Online", "avatar": ""},
                "messages": [{
                    "id": "1",
                    "content": "hello",
                    "sender": "Bot",
                    "timestamp": "2024-05-01T10:00:00Z"
                }]
            }
        }))
        .send()
        .await
        .expect("post page");
    assert_eq!(resp.status(), 200);

    let view = next_view(&mut team).await;
    assert_eq!(view.layout, "dark");
    assert_eq!(view.theme.primary_color, "#336699");
    assert_eq!(view.components.len(), 2);
    assert_eq!(view.components[0].kind, "chat-header");
    assert_eq!(view.components[0].content, "Standup in 5");
    assert_eq!(view.components[0].properties["userName"], "Bot");
    assert_eq!(view.components[1].kind, "chat-messages");
    let messages: Value =
        serde_json::from_str(&view.components[1].properties["messages"]).expect("messages");
    assert_eq!(messages[0]["content"], "hello");

    assert_silent(&mut solo).await;
}

#[tokio::test]
async fn reset_restores_global_defaults() {
    let (addr, _state) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{addr}/api/config"))
        .json(&json!({"message": "Custom", "theme": "dark"}))
        .send()
        .await
        .expect("update config");
    assert_eq!(resp.status(), 200);
    let config: Value = client
        .get(format!("http://{addr}/api/config"))
        .send()
        .await
        .expect("get config")
        .json()
        .await
        .expect("config json");
    assert_eq!(config["message"], "Custom");
    assert_eq!(config["color"], "#ffffff");

    let ack: Value = client
        .post(format!("http://{addr}/api/reset"))
        .send()
        .await
        .expect("reset")
        .json()
        .await
        .expect("ack json");
    assert_eq!(ack, json!({"status": "reset"}));

    let config: Value = client
        .get(format!("http://{addr}/api/config"))
        .send()
        .await
        .expect("get config")
        .json()
        .await
        .expect("config json");
    assert_eq!(config["message"], "Welcome to Chat");
    assert_eq!(config["color"], "#ffffff");
    assert_eq!(config["theme"], "light");
    assert_eq!(config["chatPartner"]["name"], "Chat Partner");
    assert_eq!(config["chatPartner"]["status"], "Offline");
    assert_eq!(config["messages"], json!([]));
}

#[tokio::test]
async fn subscribe_without_page_id_is_rejected_before_registration() {
    let (addr, state) = start_test_server().await;
    let err = tokio_tungstenite::connect_async(format!("ws://{addr}/ws"))
        .await
        .expect_err("missing pageId");
    match err {
        tungstenite::Error::Http(response) => assert_eq!(response.status().as_u16(), 400),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(state.subscription_hub.connection_count().await, 0);
}

#[tokio::test]
async fn plain_get_without_page_id_reports_missing_page_id() {
    let (addr, state) = start_test_server().await;
    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/ws"))
        .send()
        .await
        .expect("plain get");
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.expect("body"), "pageId is required");

    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/ws?pageId=team"))
        .send()
        .await
        .expect("plain get");
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.expect("body"), "WebSocket upgrade required");
    assert_eq!(state.subscription_hub.connection_count().await, 0);
}

#[tokio::test]
async fn restricted_origins_reject_foreign_upgrades_and_cors() {
    let config = RuntimeConfig {
        cors_allowed_origins: vec!["http://ok.example".to_string()],
        ..RuntimeConfig::default()
    };
    let (addr, state) = start_test_server_with(config).await;

    let mut request = format!("ws://{addr}/ws?pageId=team")
        .into_client_request()
        .expect("ws request");
    request.headers_mut().insert(
        "origin",
        "http://evil.example".parse().expect("origin header"),
    );
    let err = tokio_tungstenite::connect_async(request)
        .await
        .expect_err("foreign origin");
    match err {
        tungstenite::Error::Http(response) => assert_eq!(response.status().as_u16(), 403),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(state.subscription_hub.connection_count().await, 0);

    let mut request = format!("ws://{addr}/ws?pageId=team")
        .into_client_request()
        .expect("ws request");
    request
        .headers_mut()
        .insert("origin", "http://ok.example".parse().expect("origin header"));
    let _ws = subscribe_with(&state, request).await;
    assert_eq!(state.subscription_hub.connection_count().await, 1);

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("http://{addr}/api/pages"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .expect("list pages");
    assert!(resp.headers().get("access-control-allow-origin").is_none());

    let resp = client
        .get(format!("http://{addr}/api/pages"))
        .header("origin", "http://ok.example")
        .send()
        .await
        .expect("list pages");
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("http://ok.example")
    );
}

#[tokio::test]
async fn new_subscriber_gets_snapshot_of_existing_page() {
    let (addr, state) = start_test_server().await;
    reqwest::Client::new()
        .post(format!("http://{addr}/api/pages/news"))
        .json(&json!({"displayName": "News", "config": {"message": "Breaking"}}))
        .send()
        .await
        .expect("post page");

    let mut ws = subscribe(addr, &state, "news").await;
    let view = next_view(&mut ws).await;
    assert_eq!(view.components[0].content, "Breaking");
    assert_silent(&mut ws).await;

    let mut empty = subscribe(addr, &state, "unknown").await;
    assert_silent(&mut empty).await;
}

#[tokio::test]
async fn global_update_does_not_reach_page_subscribers() {
    let (addr, state) = start_test_server().await;
    let mut ws = subscribe(addr, &state, "team").await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/config"))
        .json(&json!({"message": "Global notice"}))
        .send()
        .await
        .expect("update config");
    assert_eq!(resp.status(), 200);
    assert_silent(&mut ws).await;
}

#[tokio::test]
async fn closed_connection_is_unregistered() {
    let (addr, state) = start_test_server().await;
    let mut ws = subscribe(addr, &state, "team").await;
    ws.close(None).await.expect("close");
    wait_for_subscribers(&state, 0).await;
}

#[tokio::test]
async fn client_errors_are_plain_text() {
    let (addr, state) = start_test_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/api/pages/ghost"))
        .send()
        .await
        .expect("get page");
    assert_eq!(resp.status(), 404);
    assert_eq!(resp.text().await.expect("body"), "Page not found");

    let resp = client
        .post(format!("http://{addr}/api/pages/team"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("post page");
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.text().await.expect("body"), "Invalid request body");
    assert_eq!(state.page_registry.page_count().await, 0);

    let resp = client
        .post(format!("http://{addr}/api/pages/"))
        .json(&json!({"displayName": "Nobody"}))
        .send()
        .await
        .expect("post page");
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("http://{addr}/api/config"))
        .body("not json")
        .send()
        .await
        .expect("update config");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn every_origin_is_allowed_by_default() {
    let (addr, _state) = start_test_server().await;
    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/api/pages"))
        .header("origin", "http://elsewhere.example")
        .send()
        .await
        .expect("list pages");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn metrics_report_live_connections() {
    let (addr, state) = start_test_server().await;
    let _ws = subscribe(addr, &state, "team").await;
    let body = reqwest::Client::new()
        .get(format!("http://{addr}/api/ops/metrics"))
        .send()
        .await
        .expect("metrics")
        .text()
        .await
        .expect("body");
    assert!(body.contains("chatcast_live_connections 1\n"));
    assert!(body.contains("chatcast_subscriptions_total 1\n"));
    assert!(body.contains("chatcast_pages 0\n"));
}

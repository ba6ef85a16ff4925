use std::time::Duration;

use anyhow::Result;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use backend_application::AppState;
use backend_domain::RuntimeConfig;
use backend_infrastructure::AppConfig;
use backend_interfaces_http::{build_router, ROUTE_TABLE};

use crate::context::AppContext;

/// API routes plus static files, CORS, body limit, timeout and tracing.
pub fn build_app(state: AppState) -> Router {
    let config = state.config.clone();
    let mut router = build_router(state);
    if let Some(static_dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }
    router
        .layer(cors_layer(&config))
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &RuntimeConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("ignoring invalid cors origin {:?}: {}", origin, err);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub async fn run_standalone(config: AppConfig) -> Result<()> {
    match &config.loaded_from {
        Some(path) => info!("config loaded from {}", path),
        None => warn!("config file not found, using defaults"),
    }
    if config.to_runtime_config().allows_any_origin() {
        warn!("all origins are allowed on the API and websocket upgrade");
    }

    let context = AppContext::new(&config);
    let state = context.state;

    let app = build_app(state.clone());
    let addr: std::net::SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);
    for route in ROUTE_TABLE {
        info!("route: {}", route);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("sigterm handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! Router assembly and serving.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::http::{health_routes, session_routes, SessionHandlers};
use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::application::{DeleteSessionCommand, DeleteSessionHandler, SessionRegistry};
use crate::config::{AppConfig, ServerConfig};

/// Builds the full application router: session administration, health and
/// the participant WebSocket endpoint.
pub fn build_router(registry: Arc<SessionRegistry>, config: &AppConfig) -> Router {
    let api = session_routes(SessionHandlers::new(Arc::clone(&registry)))
        .merge(health_routes(Arc::clone(&registry)))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let gateway = websocket_router(WebSocketState::new(registry, &config.broker));

    Router::new().merge(api).merge(gateway).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server)),
    )
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Serves until `shutdown` resolves, then closes every session so open
/// WebSocket connections end and the server can drain.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    registry: Arc<SessionRegistry>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let drain = async move {
        shutdown.await;
        close_all_sessions(&registry).await;
    };
    axum::serve(listener, router)
        .with_graceful_shutdown(drain)
        .await
}

async fn close_all_sessions(registry: &Arc<SessionRegistry>) {
    let handler = DeleteSessionHandler::new(Arc::clone(registry));
    let sessions = registry.list().await;
    tracing::info!(sessions = sessions.len(), "Closing sessions for shutdown");
    for summary in sessions {
        // A session can vanish between listing and deleting.
        if let Err(e) = handler.handle(DeleteSessionCommand { code: summary.code }).await {
            tracing::debug!(error = %e, "Session already gone at shutdown");
        }
    }
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

//! HTTP transport
//!
//! Axum server exposing:
//! - `GET /` the static check page
//! - `POST /api/check` the check entry point
//! - `GET /api/languages` the language table
//! - `GET /health` liveness

mod handlers;

pub use handlers::{ApiError, CheckRequest};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::CheckService;

/// Headroom for JSON framing on top of the text itself
const BODY_SLACK_BYTES: usize = 16 * 1024;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Escaped JSON spends up to 12 bytes on one character (`\ud83d\ude00`)
const MAX_ESCAPED_CHAR_BYTES: usize = 12;

/// Largest accepted request body for a given character ceiling
///
/// Sized so that any text within the ceiling fits however it is escaped; the
/// character count itself is enforced by the service.
pub fn body_limit(max_text_chars: usize) -> usize {
    max_text_chars
        .saturating_mul(MAX_ESCAPED_CHAR_BYTES)
        .saturating_add(BODY_SLACK_BYTES)
}

/// Builds the router around a ready service
pub fn router(service: CheckService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let limit = body_limit(service.max_text_chars());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/check", post(handlers::check))
        .route("/api/languages", get(handlers::languages))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serves until Ctrl-C
pub async fn serve(service: CheckService, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve_with_shutdown(listener, service, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received");
    })
    .await
}

/// Serves on an already bound listener until `shutdown` completes
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    service: CheckService,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "HTTP server listening on http://{}", addr);
    }

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    info!("HTTP server stopped");
    Ok(())
}

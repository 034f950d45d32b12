//! HTTP stub service for chat messages.
//!
//! A standalone service with three canned endpoints. It stores nothing and
//! does not talk to the broker; message ids it hands out are unrelated to the
//! ids the traffic generator publishes.
//!
//! ```text
//! GET  /api/v1/health
//! POST /api/v1/messages/send
//! GET  /api/v1/messages/conversation/{id}
//! ```

pub mod args;
pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

pub use args::ApiArgs;
pub use error::ApiError;
pub use handlers::{ConversationResponse, HealthResponse, MessageRequest, MessageResponse};

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "message-api";

/// Build the service router.
pub fn router() -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/messages/send", post(handlers::send_message))
        .route("/messages/conversation/", get(handlers::conversation))
        .route(
            "/messages/conversation/*conversation_id",
            get(handlers::conversation),
        );

    Router::new().nest("/api/v1", api)
}

/// Serve the API on `listen` until `shutdown` resolves.
pub async fn serve<F>(listen: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind to {listen}"))?;
    let addr = listener.local_addr()?;

    info!("Server starting on http://{addr}");
    info!("Available endpoints:");
    info!("  GET  /api/v1/health");
    info!("  POST /api/v1/messages/send");
    info!("  GET  /api/v1/messages/conversation/{{id}}");

    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("Server stopped");
    Ok(())
}

//! Request handlers and their JSON bodies.

use crate::error::ApiError;
use crate::SERVICE_NAME;
use axum::body::Bytes;
use axum::extract::Path;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

/// Fields absent from the body are left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageRequest {
    pub conversation_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub conversation_id: String,
    /// Always empty; the stub has no storage
    pub messages: Vec<serde_json::Value>,
}

pub async fn health() -> Json<HealthResponse> {
    info!("Health check called");

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Accept a message and hand back a locally generated id.
///
/// The body is decoded by hand so that any decoding failure maps to a plain
/// 400 rather than axum's per-rejection status codes.
pub async fn send_message(body: Bytes) -> Result<Json<MessageResponse>, ApiError> {
    let request: MessageRequest = serde_json::from_slice(&body)?;

    info!(
        "Message: {} → {}: {}",
        request.sender_id, request.receiver_id, request.content
    );

    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    Ok(Json(MessageResponse {
        status: "success".to_string(),
        message_id: format!("msg-{nanos}"),
    }))
}

/// Everything after `/messages/conversation/` is the id, slashes included.
pub async fn conversation(id: Option<Path<String>>) -> Json<ConversationResponse> {
    let conversation_id = id.map(|Path(id)| id).unwrap_or_default();
    Json(ConversationResponse {
        conversation_id,
        messages: Vec::new(),
    })
}

//! Error responses for the HTTP stub.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body could not be decoded
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MalformedInput(err) => {
                warn!("Rejected request: {err}");
                (StatusCode::BAD_REQUEST, "Invalid request").into_response()
            }
        }
    }
}

//! In-process tests for the HTTP stub routes.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use message_api::{router, ConversationResponse, HealthResponse, MessageResponse};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = body_json(response).await;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "message-api");
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
}

#[tokio::test]
async fn test_send_message() {
    let body = serde_json::json!({
        "conversation_id": "conv-1",
        "sender_id": "alice",
        "receiver_id": "bob",
        "content": "Weekend plans anyone?",
    });

    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/messages/send")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent: MessageResponse = body_json(response).await;
    assert_eq!(sent.status, "success");
    assert!(sent.message_id.starts_with("msg-"));
    assert!(sent.message_id["msg-".len()..].parse::<i64>().is_ok());
}

#[tokio::test]
async fn test_send_message_malformed_body() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/messages/send")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Invalid request");
}

#[tokio::test]
async fn test_send_message_missing_fields_accepted() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/messages/send")
                .body(Body::from(r#"{"sender_id":"alice"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent: MessageResponse = body_json(response).await;
    assert_eq!(sent.status, "success");
}

#[tokio::test]
async fn test_send_message_scalar_body_rejected() {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/messages/send")
                .body(Body::from("42"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_conversation_is_empty() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/messages/conversation/conv-3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let conversation: ConversationResponse = body_json(response).await;
    assert_eq!(conversation.conversation_id, "conv-3");
    assert!(conversation.messages.is_empty());
}

async fn conversation_id_for(uri: &str) -> String {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let conversation: ConversationResponse = body_json(response).await;
    assert!(conversation.messages.is_empty());
    conversation.conversation_id
}

#[tokio::test]
async fn test_conversation_id_with_slashes() {
    let id = conversation_id_for("/api/v1/messages/conversation/team/conv-1").await;
    assert_eq!(id, "team/conv-1");
}

#[tokio::test]
async fn test_conversation_empty_id() {
    let id = conversation_id_for("/api/v1/messages/conversation/").await;
    assert_eq!(id, "");
}

#[tokio::test]
async fn test_unknown_route() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/api/v1/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

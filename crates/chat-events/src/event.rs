//! Wire types published to the broker.
//!
//! Field names are part of the contract with downstream consumers and must
//! not change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Topic receiving `MessageEvent`s, keyed by conversation id.
pub const MESSAGE_TOPIC: &str = "chat.messages";

/// Topic receiving `ReadEvent`s, keyed by reader id.
pub const READ_TOPIC: &str = "message-views";

pub const MESSAGE_SENT_EVENT: &str = "message_sent";
pub const TEXT_MESSAGE_TYPE: &str = "text";
pub const DEFAULT_DEVICE: &str = "web";

/// A chat message sent from one user to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub message_id: String,
    /// Always the sender
    pub user_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sender_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub receiver_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message_type: String,
}

impl MessageEvent {
    /// Partition key used on `chat.messages`.
    pub fn partition_key(&self) -> &str {
        &self.conversation_id
    }
}

/// A confirmation that `user_id` viewed `message_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadEvent {
    pub message_id: String,
    pub user_id: String,
    pub viewed_at: DateTime<Utc>,
    pub device: String,
}

impl ReadEvent {
    /// Partition key used on `message-views`.
    pub fn partition_key(&self) -> &str {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> MessageEvent {
        MessageEvent {
            message_id: "msg-1700000000-7".to_string(),
            user_id: "alice".to_string(),
            content: "Weekend plans anyone?".to_string(),
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            event_type: MESSAGE_SENT_EVENT.to_string(),
            conversation_id: "conv-3".to_string(),
            sender_id: "alice".to_string(),
            receiver_id: "bob".to_string(),
            message_type: TEXT_MESSAGE_TYPE.to_string(),
        }
    }

    #[test]
    fn test_message_event_field_names() {
        let json = serde_json::to_value(sample_message()).unwrap();
        let obj = json.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "content",
                "conversation_id",
                "event_type",
                "message_id",
                "message_type",
                "receiver_id",
                "sender_id",
                "timestamp",
                "user_id",
            ]
        );
        assert_eq!(obj["timestamp"], "2023-11-14T22:13:20Z");
        assert_eq!(obj["event_type"], "message_sent");
    }

    #[test]
    fn test_message_event_omits_empty_optional_fields() {
        let mut message = sample_message();
        message.conversation_id.clear();
        message.receiver_id.clear();

        let json = serde_json::to_value(&message).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("conversation_id"));
        assert!(!obj.contains_key("receiver_id"));
        assert!(obj.contains_key("sender_id"));
        assert!(obj.contains_key("message_type"));
    }

    #[test]
    fn test_read_event_wire_format() {
        let read = ReadEvent {
            message_id: "msg-1700000000-7".to_string(),
            user_id: "bob".to_string(),
            viewed_at: DateTime::from_timestamp(1_700_000_005, 0).unwrap(),
            device: DEFAULT_DEVICE.to_string(),
        };

        let json = serde_json::to_value(&read).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message_id": "msg-1700000000-7",
                "user_id": "bob",
                "viewed_at": "2023-11-14T22:13:25Z",
                "device": "web",
            })
        );
        assert_eq!(read.partition_key(), "bob");
    }

    #[test]
    fn test_partition_key_is_conversation() {
        assert_eq!(sample_message().partition_key(), "conv-3");
    }
}

//! JSON publisher for chat events.

use crate::error::PublishError;
use crate::sink::{Delivery, EventSink};
use chat_events::{MessageEvent, ReadEvent, MESSAGE_TOPIC, READ_TOPIC};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Encodes events as JSON and sends them through a shared sink.
///
/// Cloning is cheap; every clone shares the same sink.
#[derive(Clone)]
pub struct Publisher {
    sink: Arc<dyn EventSink>,
}

impl Publisher {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Publish `event` to `topic` under `key`. Exactly one send attempt.
    pub async fn publish<T: Serialize + ?Sized>(
        &self,
        topic: &str,
        key: &str,
        event: &T,
    ) -> Result<Delivery, PublishError> {
        let payload = serde_json::to_vec(event)?;

        let delivery = self.sink.send(topic, key, &payload).await?;
        debug!(
            "Published {} bytes to {topic} (key: {key}, partition: {}, offset: {})",
            payload.len(),
            delivery.partition,
            delivery.offset
        );
        Ok(delivery)
    }

    /// Publish to `chat.messages`, keyed by conversation id.
    pub async fn publish_message(&self, message: &MessageEvent) -> Result<Delivery, PublishError> {
        self.publish(MESSAGE_TOPIC, message.partition_key(), message)
            .await
    }

    /// Publish to `message-views`, keyed by reader id.
    pub async fn publish_read(&self, read: &ReadEvent) -> Result<Delivery, PublishError> {
        self.publish(READ_TOPIC, read.partition_key(), read).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySink;
    use chat_events::{EventFactory, Roster};
    use serde::ser::Error as _;

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refusing to encode"))
        }
    }

    #[tokio::test]
    async fn test_publish_message_uses_conversation_key() {
        let sink = Arc::new(MemorySink::new());
        let publisher = Publisher::new(sink.clone());
        let mut factory = EventFactory::with_seed(Roster::default(), 42);
        let message = factory.next_message_event(0);

        let delivery = publisher.publish_message(&message).await.unwrap();
        assert_eq!(delivery, Delivery { partition: 0, offset: 0 });

        let records = sink.records_for(MESSAGE_TOPIC);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, message.conversation_id);
        let decoded: MessageEvent = records[0].json().unwrap();
        assert_eq!(decoded, message);
    }

    #[tokio::test]
    async fn test_publish_read_uses_reader_key() {
        let sink = Arc::new(MemorySink::new());
        let publisher = Publisher::new(sink.clone());
        let factory = EventFactory::with_seed(Roster::default(), 42);
        let read = factory.next_read_event("m42", "bob");

        publisher.publish_read(&read).await.unwrap();

        let records = sink.records_for(READ_TOPIC);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "bob");
        let decoded: ReadEvent = records[0].json().unwrap();
        assert_eq!(decoded.message_id, "m42");
    }

    #[tokio::test]
    async fn test_serialization_error_is_not_sent() {
        let sink = Arc::new(MemorySink::new());
        let publisher = Publisher::new(sink.clone());

        let result = publisher.publish("t", "k", &Unencodable).await;
        assert!(matches!(result, Err(PublishError::Serialization(_))));
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_broker_error_propagates() {
        let sink = Arc::new(MemorySink::new());
        sink.fail_topic(MESSAGE_TOPIC);
        let publisher = Publisher::new(sink);
        let mut factory = EventFactory::with_seed(Roster::default(), 42);

        let result = publisher
            .publish_message(&factory.next_message_event(0))
            .await;
        assert!(matches!(result, Err(PublishError::BrokerUnavailable(_))));
    }
}

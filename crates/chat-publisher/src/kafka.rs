//! Kafka transport built on rdkafka's `FutureProducer`.

use crate::error::PublishError;
use crate::sink::{Delivery, EventSink};
use async_trait::async_trait;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::ClientConfig;
use std::time::Duration;
use tracing::{debug, info};

/// How long `connect` waits for cluster metadata.
const METADATA_TIMEOUT: Duration = Duration::from_secs(10);

/// Kafka-backed event sink.
///
/// `FutureProducer` is internally synchronised and cheap to clone, so one
/// sink can be shared by the generator loop and every read task.
#[derive(Clone)]
pub struct KafkaSink {
    producer: FutureProducer,
    brokers: String,
    message_timeout: Duration,
}

impl KafkaSink {
    /// Create a producer and verify the cluster is reachable.
    ///
    /// Records are acknowledged by all in-sync replicas. Failing to fetch
    /// metadata here means no generator can run, so callers treat it as fatal.
    pub async fn connect(brokers: &str, message_timeout: Duration) -> Result<Self, PublishError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", message_timeout.as_millis().to_string())
            .set("acks", "all")
            .create()?;

        let probe = producer.clone();
        let metadata = tokio::task::spawn_blocking(move || {
            probe
                .client()
                .fetch_metadata(None, METADATA_TIMEOUT)
                .map(|m| m.brokers().len())
        })
        .await
        .map_err(|e| PublishError::BrokerUnavailable(e.to_string()))?;

        let broker_count = metadata?;
        info!("Connected to Kafka at {brokers} ({broker_count} broker(s))");

        Ok(Self {
            producer,
            brokers: brokers.to_string(),
            message_timeout,
        })
    }

    /// Create Kafka topic if it doesn't exist
    pub async fn create_topic_if_not_exists(
        &self,
        topic: &str,
        partitions: i32,
    ) -> Result<(), PublishError> {
        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .create()
            .map_err(|e| PublishError::TopicCreation(e.to_string()))?;

        let new_topic = NewTopic::new(topic, partitions, TopicReplication::Fixed(1));
        let opts = AdminOptions::new().operation_timeout(Some(Duration::from_secs(10)));

        match admin_client.create_topics(&[new_topic], &opts).await {
            Ok(results) => {
                for result in results {
                    match result {
                        Ok(topic_name) => {
                            info!("Topic '{}' created successfully", topic_name);
                        }
                        Err((topic_name, err)) => {
                            let err_str = err.to_string();
                            if err_str.contains("already exists")
                                || err_str.contains("TopicExistsException")
                            {
                                info!("Topic '{}' already exists", topic_name);
                            } else {
                                return Err(PublishError::TopicCreation(format!(
                                    "Failed to create topic {topic_name}: {err}"
                                )));
                            }
                        }
                    }
                }
            }
            Err(e) => {
                return Err(PublishError::TopicCreation(format!(
                    "Failed to create topic: {e}"
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl EventSink for KafkaSink {
    async fn send(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<Delivery, PublishError> {
        let record = FutureRecord::to(topic).key(key).payload(payload);

        let (partition, offset) = self
            .producer
            .send(record, self.message_timeout)
            .await
            .map_err(|(err, _)| PublishError::from(err))?;

        debug!("Delivered to {topic} [{partition}] @ {offset}");
        Ok(Delivery { partition, offset })
    }
}

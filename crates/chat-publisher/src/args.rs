//! CLI argument definitions for the Kafka connection.

use clap::Args;
use std::time::Duration;

/// Kafka connection arguments.
#[derive(Args, Clone, Debug)]
pub struct KafkaArgs {
    /// Kafka brokers (comma-separated, e.g., "localhost:9092")
    #[arg(long, env = "KAFKA_BROKERS", default_value = "localhost:9092")]
    pub kafka_brokers: String,

    /// How long the producer waits for a delivery acknowledgement
    #[arg(long, default_value = "5000")]
    pub message_timeout_ms: u64,

    /// Create the chat.messages and message-views topics on startup
    #[arg(long)]
    pub create_topics: bool,

    /// Partition count used when creating topics
    #[arg(long, default_value = "3")]
    pub partitions: i32,

    /// Dry run mode - generate events without contacting Kafka
    #[arg(long)]
    pub dry_run: bool,
}

impl KafkaArgs {
    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }
}

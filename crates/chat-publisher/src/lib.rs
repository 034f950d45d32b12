//! Broker publishing for the chat-traffic generator.
//!
//! This crate provides:
//! - `EventSink`: the seam between the generator and the broker transport
//! - `KafkaSink`: an `EventSink` over rdkafka's `FutureProducer`
//! - `MemorySink`: an in-process `EventSink` used for dry runs and tests
//! - `Publisher`: JSON-encodes events and hands them to a sink
//!
//! # Error handling
//!
//! Publishing is best-effort. `Publisher::publish` returns a `PublishError`
//! and leaves the decision to the caller; the generator logs and moves on.
//! Nothing here retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use chat_events::{EventFactory, Roster};
//! use chat_publisher::{KafkaSink, Publisher};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chat_publisher::PublishError> {
//!     let sink = KafkaSink::connect("localhost:9092", Duration::from_secs(5)).await?;
//!     let publisher = Publisher::new(Arc::new(sink));
//!
//!     let mut factory = EventFactory::new(Roster::default());
//!     let message = factory.next_message_event(0);
//!     let delivery = publisher.publish_message(&message).await?;
//!     println!("partition {} offset {}", delivery.partition, delivery.offset);
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod error;
pub mod kafka;
pub mod memory;
pub mod publisher;
pub mod sink;

// Re-exports for convenience
pub use args::KafkaArgs;
pub use error::PublishError;
pub use kafka::KafkaSink;
pub use memory::{MemorySink, SentRecord};
pub use publisher::Publisher;
pub use sink::{Delivery, EventSink};

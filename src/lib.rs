//! chat-traffic library
//!
//! A synthetic traffic generator publishing chat messages and read
//! confirmations to Kafka, for downstream consumers to exercise.
//!
//! # Components
//!
//! - [`RetentionBuffer`] - recently published message ids, trimmed periodically
//! - [`SimulationLoop`] - generates and publishes one message per cycle, then
//!   schedules simulated reads
//! - [`ReadSimulator`] - background tasks publishing delayed read events
//! - [`spawn_trim_task`] - periodic retention buffer trimming
//!
//! Event construction lives in `chat_events`, broker access in
//! `chat_publisher`. The HTTP stub in `message_api` is independent of all of
//! the above.
//!
//! # Topics
//!
//! - `chat.messages`: `MessageEvent` JSON, keyed by conversation id
//! - `message-views`: `ReadEvent` JSON, keyed by reader id
//!
//! # CLI Usage
//!
//! ```bash
//! # Publish traffic until Ctrl+C
//! chat-traffic produce --kafka-brokers kafka:9092 --create-topics
//!
//! # Reproducible run of 100 messages without a broker
//! chat-traffic produce --dry-run --seed 42 --count 100
//!
//! # HTTP stub service
//! chat-traffic api --listen 0.0.0.0:8080
//! ```

pub mod config;
pub mod error;
pub mod read_simulator;
pub mod retention;
pub mod shutdown;
pub mod simulation;
pub mod stats;
pub mod trim;

pub use config::{DelayRange, ProduceArgs, SimulationConfig};
pub use error::SimulationError;
pub use read_simulator::{ReadKind, ReadSimulator, ScheduledRead};
pub use retention::{RetentionBuffer, DEFAULT_RETENTION_CAP};
pub use shutdown::{setup_shutdown_handler, shutdown_signal};
pub use simulation::{CycleReport, LoopState, SimulationLoop};
pub use stats::{SimulationStats, StatsSnapshot};
pub use trim::spawn_trim_task;

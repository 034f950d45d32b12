//! Delayed read confirmations.
//!
//! Each scheduled read is its own tokio task: it sleeps, publishes one
//! `ReadEvent` and exits. Tasks are never cancelled and never report back to
//! the loop; on shutdown any that are still sleeping are dropped.

use crate::stats::SimulationStats;
use chat_events::read_event_at;
use chat_publisher::Publisher;
use chrono::Utc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Why a read was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadKind {
    /// The receiver of the message just sent
    Targeted,
    /// Anyone glancing at a message from recent history
    History,
}

/// A read waiting to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledRead {
    pub kind: ReadKind,
    pub message_id: String,
    pub reader_id: String,
    pub delay: Duration,
}

/// Spawns fire-and-forget read tasks.
#[derive(Clone)]
pub struct ReadSimulator {
    publisher: Publisher,
    stats: SimulationStats,
}

impl ReadSimulator {
    pub fn new(publisher: Publisher, stats: SimulationStats) -> Self {
        Self { publisher, stats }
    }

    /// Spawn a task publishing `read` once its delay elapses.
    ///
    /// The handle may be dropped; the task runs to completion regardless.
    pub fn spawn(&self, read: ScheduledRead) -> JoinHandle<()> {
        let publisher = self.publisher.clone();
        let stats = self.stats.clone();
        stats.read_scheduled();

        debug!(
            "Scheduled {:?} read of {} by {} in {:?}",
            read.kind, read.message_id, read.reader_id, read.delay
        );

        tokio::spawn(async move {
            tokio::time::sleep(read.delay).await;

            let event = read_event_at(&read.message_id, &read.reader_id, Utc::now());
            match publisher.publish_read(&event).await {
                Ok(delivery) => {
                    stats.read_published();
                    info!(
                        "Message view: {} read by {} (partition: {}, offset: {})",
                        event.message_id, event.user_id, delivery.partition, delivery.offset
                    );
                }
                Err(e) => {
                    stats.read_failed();
                    warn!("Failed to send message view for {}: {e}", event.message_id);
                }
            }
        })
    }
}

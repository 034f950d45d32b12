//! The transport seam used by `Publisher`.

use crate::error::PublishError;
use async_trait::async_trait;

/// Where the broker stored a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

/// A destination for encoded records.
///
/// Implementations must be safe to call concurrently from many tasks; each
/// call is independent and carries its own topic, key and payload.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Send one record and wait for the broker's acknowledgement.
    async fn send(&self, topic: &str, key: &str, payload: &[u8])
        -> Result<Delivery, PublishError>;
}

//! In-process event sink.
//!
//! Used by `--dry-run` (discarding mode) and by tests that need to inspect
//! what would have reached the broker or simulate an unavailable broker.

use crate::error::PublishError;
use crate::sink::{Delivery, EventSink};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// A record accepted by `MemorySink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRecord {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
    pub offset: i64,
}

impl SentRecord {
    /// Decode the payload as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }
}

#[derive(Default)]
struct MemoryState {
    records: Vec<SentRecord>,
    offsets: HashMap<String, i64>,
    failing: HashSet<String>,
}

/// Event sink that assigns offsets per topic on partition 0.
pub struct MemorySink {
    state: Mutex<MemoryState>,
    keep_records: bool,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    /// A sink that keeps every record for inspection.
    pub fn new() -> Self {
        Self {
            state: Mutex::default(),
            keep_records: true,
        }
    }

    /// A sink that only assigns offsets; memory use stays flat.
    pub fn discarding() -> Self {
        Self {
            state: Mutex::default(),
            keep_records: false,
        }
    }

    /// Make every send to `topic` fail as if the broker were down.
    pub fn fail_topic(&self, topic: &str) {
        self.lock().failing.insert(topic.to_string());
    }

    /// Undo `fail_topic`.
    pub fn restore_topic(&self, topic: &str) {
        self.lock().failing.remove(topic);
    }

    /// All records sent so far, in send order.
    pub fn records(&self) -> Vec<SentRecord> {
        self.lock().records.clone()
    }

    /// Records sent to one topic, in send order.
    pub fn records_for(&self, topic: &str) -> Vec<SentRecord> {
        self.lock()
            .records
            .iter()
            .filter(|r| r.topic == topic)
            .cloned()
            .collect()
    }

    /// Number of records accepted for `topic`.
    pub fn delivered(&self, topic: &str) -> i64 {
        self.lock().offsets.get(topic).copied().unwrap_or(0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EventSink for MemorySink {
    async fn send(
        &self,
        topic: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<Delivery, PublishError> {
        let mut state = self.lock();
        if state.failing.contains(topic) {
            return Err(PublishError::BrokerUnavailable(format!(
                "topic {topic} is unreachable"
            )));
        }

        let next = state.offsets.entry(topic.to_string()).or_insert(0);
        let offset = *next;
        *next += 1;

        if self.keep_records {
            state.records.push(SentRecord {
                topic: topic.to_string(),
                key: key.to_string(),
                payload: payload.to_vec(),
                offset,
            });
        }

        Ok(Delivery {
            partition: 0,
            offset,
        })
    }
}

//! Counters for a generator run.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Default, Debug)]
struct Counters {
    cycles: AtomicU64,
    messages_published: AtomicU64,
    message_failures: AtomicU64,
    reads_scheduled: AtomicU64,
    reads_published: AtomicU64,
    read_failures: AtomicU64,
    ids_trimmed: AtomicU64,
}

/// Counters shared by the loop, read tasks and the trim task.
#[derive(Clone, Default, Debug)]
pub struct SimulationStats {
    counters: Arc<Counters>,
}

/// Point-in-time copy of `SimulationStats`.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub cycles: u64,
    pub messages_published: u64,
    pub message_failures: u64,
    pub reads_scheduled: u64,
    pub reads_published: u64,
    pub read_failures: u64,
    pub ids_trimmed: u64,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle(&self) {
        self.counters.cycles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn message_published(&self) {
        self.counters
            .messages_published
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn message_failed(&self) {
        self.counters.message_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn read_scheduled(&self) {
        self.counters.reads_scheduled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn read_published(&self) {
        self.counters.reads_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn read_failed(&self) {
        self.counters.read_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn trimmed(&self, count: usize) {
        self.counters
            .ids_trimmed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let c = &self.counters;
        StatsSnapshot {
            cycles: c.cycles.load(Ordering::Relaxed),
            messages_published: c.messages_published.load(Ordering::Relaxed),
            message_failures: c.message_failures.load(Ordering::Relaxed),
            reads_scheduled: c.reads_scheduled.load(Ordering::Relaxed),
            reads_published: c.reads_published.load(Ordering::Relaxed),
            read_failures: c.read_failures.load(Ordering::Relaxed),
            ids_trimmed: c.ids_trimmed.load(Ordering::Relaxed),
        }
    }
}

impl StatsSnapshot {
    /// Reads scheduled but not yet published or failed.
    pub fn reads_pending(&self) -> u64 {
        self.reads_scheduled
            .saturating_sub(self.reads_published + self.read_failures)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cycles, {} messages published ({} failed), {} reads published ({} failed, {} pending)",
            self.cycles,
            self.messages_published,
            self.message_failures,
            self.reads_published,
            self.read_failures,
            self.reads_pending()
        )
    }
}

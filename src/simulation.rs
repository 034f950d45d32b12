//! The generator loop.
//!
//! Each cycle walks `Idle -> Generating -> Publishing -> Scheduling -> Idle`:
//!
//! 1. Generating: build the next `MessageEvent`.
//! 2. Publishing: send it to `chat.messages`; on success remember its id.
//! 3. Scheduling: maybe spawn a targeted read of that message, and
//!    independently maybe spawn a read of a random recent message.
//!
//! Publish failures are logged and counted; the loop always moves on to the
//! next cycle. Only shutdown (or running `max_messages` cycles) ends the run.

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::read_simulator::{ReadKind, ReadSimulator, ScheduledRead};
use crate::retention::RetentionBuffer;
use crate::stats::{SimulationStats, StatsSnapshot};
use crate::trim::spawn_trim_task;
use chat_events::{EventFactory, MessageEvent, Roster};
use chat_publisher::Publisher;
use tokio::sync::broadcast;
use tracing::{debug, error, info, trace, warn};

/// Where the loop is within a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Generating,
    Publishing,
    Scheduling,
}

/// What happened during one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub sequence: u64,
    pub message_id: String,
    pub published: bool,
    pub targeted_read: Option<ScheduledRead>,
    pub history_read: Option<ScheduledRead>,
}

/// Drives message generation, publication and read scheduling.
pub struct SimulationLoop {
    factory: EventFactory,
    publisher: Publisher,
    buffer: RetentionBuffer,
    reads: ReadSimulator,
    stats: SimulationStats,
    config: SimulationConfig,
    state: LoopState,
    sequence: u64,
}

impl SimulationLoop {
    pub fn new(
        roster: Roster,
        publisher: Publisher,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let factory = match config.seed {
            Some(seed) => EventFactory::with_seed(roster, seed),
            None => EventFactory::new(roster),
        }
        .with_conversations(config.conversations)?;

        let stats = SimulationStats::new();
        Ok(Self {
            factory,
            reads: ReadSimulator::new(publisher.clone(), stats.clone()),
            publisher,
            buffer: RetentionBuffer::new(config.retention_cap),
            stats,
            config,
            state: LoopState::Idle,
            sequence: 0,
        })
    }

    pub fn buffer(&self) -> &RetentionBuffer {
        &self.buffer
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run cycles until `shutdown` fires or `max_messages` cycles have run.
    ///
    /// Read tasks still sleeping when this returns are left to finish on
    /// their own, or are lost if the runtime shuts down first.
    pub async fn run_until(mut self, mut shutdown: broadcast::Receiver<()>) -> StatsSnapshot {
        let trimmer = spawn_trim_task(
            self.buffer.clone(),
            self.config.trim_interval,
            self.stats.clone(),
        );

        info!(
            "Producing chat traffic every {:?} (retention cap: {}, trim every {:?})",
            self.config.interval, self.config.retention_cap, self.config.trim_interval
        );

        loop {
            if self.limit_reached() {
                break;
            }

            self.run_cycle().await;

            if self.limit_reached() {
                break;
            }

            if self.config.report_every > 0 && self.sequence % self.config.report_every == 0 {
                info!("Progress: {}", self.stats.snapshot());
            }

            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }
        }

        trimmer.abort();

        let snapshot = self.stats.snapshot();
        if snapshot.reads_pending() > 0 {
            warn!(
                "Abandoning {} pending simulated read(s)",
                snapshot.reads_pending()
            );
        }
        info!("Producer finished: {snapshot}");
        snapshot
    }

    fn limit_reached(&self) -> bool {
        let reached = self
            .config
            .max_messages
            .is_some_and(|max| self.sequence >= max);
        if reached {
            info!("Reached {} cycles, stopping", self.sequence);
        }
        reached
    }

    /// Generate, publish and schedule reads for one message.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let sequence = self.sequence;
        self.sequence += 1;
        self.stats.cycle();

        self.transition(LoopState::Generating);
        let message = self.factory.next_message_event(sequence);

        self.transition(LoopState::Publishing);
        let published = self.publish(&message).await;

        self.transition(LoopState::Scheduling);
        let targeted_read = self.schedule_targeted_read(&message, published);
        let history_read = self.schedule_history_read();

        self.transition(LoopState::Idle);
        CycleReport {
            sequence,
            message_id: message.message_id,
            published,
            targeted_read,
            history_read,
        }
    }

    async fn publish(&mut self, message: &MessageEvent) -> bool {
        match self.publisher.publish_message(message).await {
            Ok(delivery) => {
                self.stats.message_published();
                self.buffer.record(message.message_id.clone());
                info!(
                    "[{}] {} → {}: {} (partition: {}, offset: {})",
                    message.conversation_id,
                    message.sender_id,
                    message.receiver_id,
                    message.content,
                    delivery.partition,
                    delivery.offset
                );
                true
            }
            Err(e) if e.is_transient() => {
                self.stats.message_failed();
                warn!("Failed to send message {}: {e}", message.message_id);
                false
            }
            Err(e) => {
                self.stats.message_failed();
                error!("Failed to encode message {}: {e}", message.message_id);
                false
            }
        }
    }

    fn schedule_targeted_read(
        &mut self,
        message: &MessageEvent,
        published: bool,
    ) -> Option<ScheduledRead> {
        // The rng sequence must not depend on broker outcomes
        let roll = self.factory.chance(self.config.targeted_read_probability);
        if !(roll && published) {
            return None;
        }

        let range = self.config.targeted_read_delay;
        let read = ScheduledRead {
            kind: ReadKind::Targeted,
            message_id: message.message_id.clone(),
            reader_id: message.receiver_id.clone(),
            delay: self.factory.delay_between(range.min, range.max),
        };
        self.reads.spawn(read.clone());
        Some(read)
    }

    fn schedule_history_read(&mut self) -> Option<ScheduledRead> {
        if !self.factory.chance(self.config.history_read_probability) {
            return None;
        }

        let Some(message_id) = self.buffer.sample(self.factory.rng()) else {
            debug!("No recent messages to read yet");
            return None;
        };

        let range = self.config.history_read_delay;
        let read = ScheduledRead {
            kind: ReadKind::History,
            message_id,
            reader_id: self.factory.random_user(),
            delay: self.factory.delay_between(range.min, range.max),
        };
        self.reads.spawn(read.clone());
        Some(read)
    }

    fn transition(&mut self, next: LoopState) {
        trace!("Loop state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

//! Event factory producing chat messages and read confirmations.

use crate::error::EventError;
use crate::event::{MessageEvent, ReadEvent, DEFAULT_DEVICE, MESSAGE_SENT_EVENT, TEXT_MESSAGE_TYPE};
use crate::roster::Roster;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Number of distinct conversations messages are spread across.
pub const DEFAULT_CONVERSATION_COUNT: u32 = 5;

/// Builds events from a roster using a single random number generator.
///
/// Every random decision made during a run (content, participants,
/// conversation, read scheduling and delays) is drawn from the factory's
/// RNG, so a seeded factory replays the same run.
pub struct EventFactory {
    roster: Roster,
    rng: StdRng,
    conversations: u32,
}

impl EventFactory {
    /// Create a factory seeded from OS entropy.
    pub fn new(roster: Roster) -> Self {
        Self {
            roster,
            rng: StdRng::from_entropy(),
            conversations: DEFAULT_CONVERSATION_COUNT,
        }
    }

    /// Create a factory with a deterministic seed.
    pub fn with_seed(roster: Roster, seed: u64) -> Self {
        Self {
            roster,
            rng: StdRng::seed_from_u64(seed),
            conversations: DEFAULT_CONVERSATION_COUNT,
        }
    }

    /// Set how many conversations messages are spread across.
    pub fn with_conversations(mut self, conversations: u32) -> Result<Self, EventError> {
        if conversations == 0 {
            return Err(EventError::NoConversations);
        }
        self.conversations = conversations;
        Ok(self)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Generate the next message event stamped with the current time.
    pub fn next_message_event(&mut self, sequence: u64) -> MessageEvent {
        self.next_message_event_at(sequence, Utc::now())
    }

    /// Generate the next message event stamped with `now`.
    ///
    /// The id is `msg-<unix seconds>-<sequence>`, unique as long as callers
    /// never reuse a sequence number within a process.
    pub fn next_message_event_at(&mut self, sequence: u64, now: DateTime<Utc>) -> MessageEvent {
        let topics = self.roster.topics();
        let topic = &topics[self.rng.gen_range(0..topics.len())];
        let content = topic.lines[self.rng.gen_range(0..topic.lines.len())].clone();

        let users = self.roster.users();
        let sender = self.rng.gen_range(0..users.len());
        let mut receiver = self.rng.gen_range(0..users.len());
        // Roster guarantees at least two users, so this terminates
        while users[receiver] == users[sender] {
            receiver = self.rng.gen_range(0..users.len());
        }
        let sender = users[sender].clone();
        let receiver = users[receiver].clone();

        let conversation = self.rng.gen_range(1..=self.conversations);

        MessageEvent {
            message_id: format!("msg-{}-{}", now.timestamp(), sequence),
            user_id: sender.clone(),
            content,
            timestamp: now,
            event_type: MESSAGE_SENT_EVENT.to_string(),
            conversation_id: format!("conv-{conversation}"),
            sender_id: sender,
            receiver_id: receiver,
            message_type: TEXT_MESSAGE_TYPE.to_string(),
        }
    }

    /// Build a read confirmation stamped with the current time.
    pub fn next_read_event(&self, message_id: &str, reader_id: &str) -> ReadEvent {
        read_event_at(message_id, reader_id, Utc::now())
    }

    /// Pick any user from the roster.
    pub fn random_user(&mut self) -> String {
        let users = self.roster.users();
        users[self.rng.gen_range(0..users.len())].clone()
    }

    /// Bernoulli draw with the given probability, clamped to `[0, 1]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Uniform delay in `[min, max]` with millisecond resolution.
    pub fn delay_between(&mut self, min: Duration, max: Duration) -> Duration {
        let min_ms = min.as_millis() as u64;
        let max_ms = max.as_millis() as u64;
        if max_ms <= min_ms {
            return min;
        }
        Duration::from_millis(self.rng.gen_range(min_ms..=max_ms))
    }

    /// Access the underlying RNG, e.g. for sampling shared history.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

/// Build a read confirmation stamped with `viewed_at`.
pub fn read_event_at(message_id: &str, reader_id: &str, viewed_at: DateTime<Utc>) -> ReadEvent {
    ReadEvent {
        message_id: message_id.to_string(),
        user_id: reader_id.to_string(),
        viewed_at,
        device: DEFAULT_DEVICE.to_string(),
    }
}

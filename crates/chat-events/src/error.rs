//! Error types for event generation.

use thiserror::Error;

/// Errors raised while building a roster or an event factory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Sender/receiver selection needs at least two distinct users
    #[error("Roster needs at least 2 distinct users, got {0}")]
    RosterTooSmall(usize),

    #[error("Roster has no topic categories")]
    NoTopics,

    #[error("Topic category '{0}' has no content")]
    EmptyTopic(String),

    #[error("Conversation count must be at least 1")]
    NoConversations,
}

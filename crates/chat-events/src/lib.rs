//! Event generation for the chat-traffic generator.
//!
//! This crate provides the wire types published to the broker and the
//! `EventFactory` that produces them. The factory draws every random choice
//! from a single `StdRng`, so a run seeded with the same value (and fed the
//! same clock) produces the same sequence of events.
//!
//! # Architecture
//!
//! ```text
//!   Roster (users + topic content)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │  EventFactory   │
//! │                 │
//! │  - roster       │
//! │  - rng (StdRng) │
//! └────────┬────────┘
//!          │
//!          ├──► MessageEvent  (chat.messages)
//!          └──► ReadEvent     (message-views)
//! ```
//!
//! # Example
//!
//! ```rust
//! use chat_events::{EventFactory, Roster};
//!
//! let mut factory = EventFactory::with_seed(Roster::default(), 42);
//! let message = factory.next_message_event(0);
//! assert_ne!(message.sender_id, message.receiver_id);
//!
//! let read = factory.next_read_event(&message.message_id, &message.receiver_id);
//! assert_eq!(read.message_id, message.message_id);
//! ```

pub mod error;
pub mod event;
pub mod factory;
pub mod roster;

// Re-exports for convenience
pub use error::EventError;
pub use event::{
    MessageEvent, ReadEvent, DEFAULT_DEVICE, MESSAGE_SENT_EVENT, MESSAGE_TOPIC, READ_TOPIC,
    TEXT_MESSAGE_TYPE,
};
pub use factory::{read_event_at, EventFactory, DEFAULT_CONVERSATION_COUNT};
pub use roster::{Roster, TopicCategory};

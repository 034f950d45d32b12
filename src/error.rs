//! Error types for setting up a generator run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Event setup error: {0}")]
    Events(#[from] chat_events::EventError),
}

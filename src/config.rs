//! Generator configuration and its command-line form.

use crate::error::SimulationError;
use crate::retention::DEFAULT_RETENTION_CAP;
use chat_events::DEFAULT_CONVERSATION_COUNT;
use chat_publisher::KafkaArgs;
use clap::Args;
use std::time::Duration;

/// Inclusive range a random delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub const fn from_secs(min: u64, max: u64) -> Self {
        Self {
            min: Duration::from_secs(min),
            max: Duration::from_secs(max),
        }
    }
}

/// Settings for one generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Time between two message cycles
    pub interval: Duration,
    /// Time between two retention buffer trims
    pub trim_interval: Duration,
    pub retention_cap: usize,
    pub conversations: u32,
    /// Chance the receiver reads the message just sent
    pub targeted_read_probability: f64,
    pub targeted_read_delay: DelayRange,
    /// Chance someone reads a message from recent history
    pub history_read_probability: f64,
    pub history_read_delay: DelayRange,
    /// Stop after this many cycles; run until shutdown when `None`
    pub max_messages: Option<u64>,
    pub seed: Option<u64>,
    /// Log a stats summary every this many cycles (0 disables)
    pub report_every: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            trim_interval: Duration::from_secs(30),
            retention_cap: DEFAULT_RETENTION_CAP,
            conversations: DEFAULT_CONVERSATION_COUNT,
            targeted_read_probability: 1.0 / 3.0,
            targeted_read_delay: DelayRange::from_secs(1, 10),
            history_read_probability: 0.1,
            history_read_delay: DelayRange::from_secs(5, 20),
            max_messages: None,
            seed: None,
            report_every: 30,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trim_interval.is_zero() {
            return Err(SimulationError::InvalidConfig(
                "trim interval must be greater than zero".to_string(),
            ));
        }
        for (name, p) in [
            ("targeted read probability", self.targeted_read_probability),
            ("history read probability", self.history_read_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {p}"
                )));
            }
        }
        for (name, range) in [
            ("targeted read delay", self.targeted_read_delay),
            ("history read delay", self.history_read_delay),
        ] {
            if range.min > range.max {
                return Err(SimulationError::InvalidConfig(format!(
                    "{name} minimum {:?} exceeds maximum {:?}",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

/// Arguments of the `produce` command.
#[derive(Args, Clone, Debug)]
pub struct ProduceArgs {
    #[command(flatten)]
    pub kafka: KafkaArgs,

    /// Milliseconds between two chat messages
    #[arg(long, default_value = "2000")]
    pub interval_ms: u64,

    /// Seconds between two retention buffer trims
    #[arg(long, default_value = "30")]
    pub trim_interval_secs: u64,

    /// Number of recent message ids kept for simulated reads
    #[arg(long, default_value = "50")]
    pub retention_cap: usize,

    /// Number of conversations messages are spread across
    #[arg(long, default_value = "5")]
    pub conversations: u32,

    /// Random seed for deterministic generation (same seed = same traffic)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many generation cycles, successful or not (default: run until Ctrl+C)
    #[arg(long)]
    pub count: Option<u64>,
}

impl From<&ProduceArgs> for SimulationConfig {
    fn from(args: &ProduceArgs) -> Self {
        Self {
            interval: Duration::from_millis(args.interval_ms),
            trim_interval: Duration::from_secs(args.trim_interval_secs),
            retention_cap: args.retention_cap,
            conversations: args.conversations,
            max_messages: args.count,
            seed: args.seed,
            ..Self::default()
        }
    }
}

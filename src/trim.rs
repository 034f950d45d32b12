//! Periodic trimming of the retention buffer.

use crate::retention::RetentionBuffer;
use crate::stats::SimulationStats;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Spawn a task trimming `buffer` every `period`, starting one period from now.
pub fn spawn_trim_task(
    buffer: RetentionBuffer,
    period: Duration,
    stats: SimulationStats,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let dropped = buffer.trim();
            if dropped > 0 {
                stats.trimmed(dropped);
                info!(
                    "Cleaned up recent messages, keeping last {} (dropped {dropped})",
                    buffer.cap()
                );
            } else {
                debug!("Retention buffer within bound ({} ids)", buffer.len());
            }
        }
    })
}

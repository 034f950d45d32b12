//! Command-line interface for chat-traffic
//!
//! # Usage Examples
//!
//! ## Produce
//! ```bash
//! # Publish a message every 2s to the local broker, creating topics first
//! chat-traffic produce --kafka-brokers localhost:9092 --create-topics
//!
//! # Faster, reproducible, bounded run
//! chat-traffic produce --interval-ms 200 --seed 42 --count 500
//!
//! # Exercise the generator without a broker
//! RUST_LOG=info chat-traffic produce --dry-run --count 20
//! ```
//!
//! ## HTTP stub
//! ```bash
//! chat-traffic api --listen 0.0.0.0:8080
//! ```

use anyhow::Context;
use chat_events::{Roster, MESSAGE_TOPIC, READ_TOPIC};
use chat_publisher::{EventSink, KafkaSink, MemorySink, Publisher};
use chat_traffic::{
    setup_shutdown_handler, shutdown_signal, ProduceArgs, SimulationConfig, SimulationLoop,
};
use clap::{Parser, Subcommand};
use message_api::ApiArgs;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "chat-traffic")]
#[command(about = "Synthetic chat traffic generator for Kafka")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish chat messages and simulated reads to Kafka
    Produce(ProduceArgs),

    /// Run the HTTP message API stub
    Api(ApiArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Produce(args) => run_produce(args).await,
        Commands::Api(args) => message_api::serve(&args.listen, shutdown_signal()).await,
    }
}

async fn run_produce(args: ProduceArgs) -> anyhow::Result<()> {
    let config = SimulationConfig::from(&args);

    let sink: Arc<dyn EventSink> = if args.kafka.dry_run {
        info!("Dry run: events are generated but not sent to Kafka");
        Arc::new(MemorySink::discarding())
    } else {
        let brokers = &args.kafka.kafka_brokers;
        let sink = KafkaSink::connect(brokers, args.kafka.message_timeout())
            .await
            .with_context(|| format!("Failed to connect to Kafka at {brokers}"))?;

        if args.kafka.create_topics {
            for topic in [MESSAGE_TOPIC, READ_TOPIC] {
                sink.create_topic_if_not_exists(topic, args.kafka.partitions)
                    .await
                    .with_context(|| format!("Failed to create topic '{topic}'"))?;
            }
        }
        Arc::new(sink)
    };

    let simulation = SimulationLoop::new(Roster::default(), Publisher::new(sink), config)
        .context("Failed to set up generator")?;

    let shutdown = setup_shutdown_handler();
    simulation.run_until(shutdown).await;

    Ok(())
}

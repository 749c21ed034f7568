use anyhow::Context;
use clap::Parser;
use pastebox::{
    DEFAULT_EVENT_CAPACITY, LifecycleEngine, MemoryStore, PasteStore, StoreConfig, Sweeper,
    SweeperOpts, event_channel, run_consumer,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Short-lived paste storage with TTL retention and delete-on-read.
#[derive(Parser)]
#[command(name = "pastebox", version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .init();

    // Any missing setting is fatal before we serve anything.
    let config = StoreConfig::from_env().context("failed to load store configuration")?;
    tracing::info!(
        endpoint = %config.endpoint,
        database = %config.database_name,
        container = %config.container_name,
        "storage configured"
    );

    let store: Arc<dyn PasteStore> = Arc::new(MemoryStore::new());
    let (events, events_rx) = event_channel(DEFAULT_EVENT_CAPACITY);

    let engine = LifecycleEngine::new(store.clone(), events.clone());

    // Startup self-check: run one paste through its full lifecycle so a
    // broken store surfaces now, not on the first real request.
    let probe = engine
        .create_paste("pastebox-startup-probe", 1, false)
        .await
        .context("store self-check: create failed")?;
    engine
        .get_paste(&probe.id)
        .await
        .context("store self-check: read failed")?;
    engine
        .delete_paste(&probe.id)
        .await
        .context("store self-check: delete failed")?;
    tracing::debug!("store self-check passed");

    let sweeper_opts = SweeperOpts::from_env().context("failed to load sweeper configuration")?;
    tracing::info!(interval_secs = sweeper_opts.interval.as_secs(), "starting sweeper");
    let sweeper = Sweeper::new(store.clone(), events.clone()).spawn(sweeper_opts);

    // The consumer is the only task that logs events; it runs until
    // shutdown. Drop our own sender so it only stays alive for real
    // producers.
    drop(events);
    tokio::select! {
        _ = run_consumer(events_rx) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    sweeper.stop().await.context("failed to stop sweeper")?;
    Ok(())
}

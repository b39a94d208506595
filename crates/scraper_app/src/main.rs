//! position_scraper: polls a positions endpoint and publishes every record
//! to Redis with a short expiry, alongside a metrics listener.

mod config;
mod logging;
mod metrics;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::{engine_error, engine_info};
use scraper_engine::{Poller, PollerHandle, RedisStore, ReqwestFetcher};

use config::Args;
use metrics::MetricsState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::initialize(args.log_format(), args.log_context());

    engine_info!(
        "Starting position_scraper v{} - waiting {}s for the store",
        env!("CARGO_PKG_VERSION"),
        args.startup_delay_secs
    );
    tokio::time::sleep(args.startup_delay()).await;

    // One store handle for the lifetime of the process, owned by the poller.
    let store = RedisStore::connect(&args.redis_url)
        .await
        .with_context(|| format!("failed to connect to store at {}", args.redis_url))?;
    engine_info!("Connected to store at {}", args.redis_url);

    let config = args.poller_config();
    let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
    let poller = PollerHandle::spawn(Poller::new(config, fetcher, Arc::new(store)));

    let listener = tokio::net::TcpListener::bind(args.metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener on {}", args.metrics_addr))?;
    engine_info!("Metrics listening on http://{}/metrics", args.metrics_addr);

    axum::serve(listener, metrics::router(MetricsState::new()))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("metrics listener failed")?;

    poller.stop();
    if let Err(err) = poller.join().await {
        engine_error!("Poller task ended abnormally: {}", err);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        engine_error!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    engine_info!("Shutdown requested");
}

#![warn(clippy::all)]

use log::{error, info};
use std::process;
use std::sync::Arc;
use zone_relay::logging::{init_logger, level_from_env};
use zone_relay::network::processing::RelayProcessor;
use zone_relay::network::transport::NatsTransport;
use zone_relay::settings::RelaySettings;

/// Main entry point for the relay
#[tokio::main]
async fn main() {
    if let Err(e) = init_logger(level_from_env()) {
        eprintln!("Failed to initialize logger: {}", e);
        return;
    }

    info!("Zone relay starting up");

    if let Err(e) = run().await {
        error!("Zone relay failed: {}", e);
        process::exit(1);
    }
}

async fn run() -> zone_relay::Result<()> {
    let settings = RelaySettings::from_env()?;
    info!(
        "Using {} delay of {}ms, message bus at {}",
        settings.delay.distribution, settings.delay.delay_ms, settings.transport.servers
    );

    let transport = NatsTransport::connect(&settings.transport).await?;

    RelayProcessor::new(Arc::new(transport), &settings)
        .run(shutdown_signal())
        .await
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler the relay runs until killed
        std::future::pending::<()>().await;
    }
}

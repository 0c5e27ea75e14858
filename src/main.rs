// src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use uptime_monitor::{
    chat::DiscordClient,
    config,
    context::AppContext,
    notify::Notifier,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_monitor=debug".parse()?)
                .add_directive("reqwest=info".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path).await?;

    // Create chat client and application context
    let chat = Arc::new(DiscordClient::new(config.token.clone()));
    let ctx = Arc::new(AppContext::new(config, chat)?);

    info!(
        "Monitoring {} targets every {:?}",
        ctx.targets().len(),
        ctx.config.check.interval()
    );

    // Start the check loop as an owned task
    let notifier = Arc::new(Notifier::new(ctx));
    let handle = tokio::spawn(notifier.clone().start());

    shutdown_signal().await;

    notifier.shutdown();
    handle.await?;

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

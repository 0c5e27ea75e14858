// src/notify/notifier.rs
use crate::chat::ChatError;
use crate::context::AppContext;
use anyhow::Result;
use std::sync::Arc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info, warn};

/// The periodic check loop. Sleeps one interval, checks every target, and
/// alerts the configured channel for each one that is down. Stateless
/// between cycles: a target that stays down re-alerts every cycle.
pub struct Notifier {
    ctx: Arc<AppContext>,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl Notifier {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        Self {
            ctx,
            shutdown_tx,
            shutdown_rx,
        }
    }

    pub async fn start(self: Arc<Self>) {
        let period = self.ctx.config.check.interval();
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the loop
        // sleeps a full interval before the first check.
        ticker.tick().await;

        let mut shutdown_rx = self.shutdown_rx.clone();

        info!("Starting notifier loop with interval: {:?}", period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.run_cycle().await {
                        // The rest of this cycle is abandoned; the loop
                        // itself keeps going.
                        error!("Check cycle failed: {:#}", e);
                    }
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Notifier loop shutting down");
                        break;
                    }
                }
            }
        }
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// One check-and-alert pass. Returns the number of alerts sent. A
    /// missing destination channel skips the notifications but is not an
    /// error; anything else aborts the cycle.
    pub async fn run_cycle(&self) -> Result<usize> {
        let results = self.ctx.checker.check_all(self.ctx.targets()).await?;

        let channel = match self.ctx.chat.resolve_channel(self.ctx.config.channel).await {
            Ok(channel) => channel,
            Err(ChatError::DestinationNotFound(id)) => {
                error!("Could not find channel with ID {}", id);
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let mut sent = 0;
        for result in results.iter().filter(|r| !r.healthy) {
            warn!("{} is down", result.target.name);
            let message = format!(
                "**{} is down!** <@{}>",
                result.target.name, self.ctx.config.owner
            );
            self.ctx.chat.send_message(&channel, &message).await?;
            sent += 1;
        }

        if sent == 0 {
            info!("All {} targets healthy", results.len());
        }

        Ok(sent)
    }
}

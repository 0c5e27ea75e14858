// src/context.rs
use crate::chat::ChatClient;
use crate::config::Config;
use crate::health::{HealthChecker, ServiceTarget};
use anyhow::Result;
use std::sync::Arc;

/// Everything the notifier loop and command handlers need, passed
/// explicitly instead of captured from globals.
pub struct AppContext {
    pub config: Config,
    pub chat: Arc<dyn ChatClient>,
    pub checker: HealthChecker,
}

impl AppContext {
    pub fn new(config: Config, chat: Arc<dyn ChatClient>) -> Result<Self> {
        let checker = HealthChecker::new(&config.check)?;
        Ok(Self {
            config,
            chat,
            checker,
        })
    }

    pub fn targets(&self) -> &[ServiceTarget] {
        &self.config.targets
    }
}

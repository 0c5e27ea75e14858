// src/health/checker.rs
use crate::config::CheckConfig;
use crate::health::{RetryStrategy, ServiceTarget};
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

pub struct HealthChecker {
    client: Client,
    retry: RetryStrategy,
}

#[derive(Debug, Clone)]
pub struct HealthResult {
    pub target: ServiceTarget,
    pub healthy: bool,
    pub response_time_ms: u64,
}

impl HealthChecker {
    pub fn new(config: &CheckConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            retry: RetryStrategy::new(config.retry.clone()),
        })
    }

    /// Check every target, strictly one at a time. A transport failure on
    /// any target fails the whole cycle; an unexpected status code does
    /// not, it just reports the target as unhealthy.
    pub async fn check_all(&self, targets: &[ServiceTarget]) -> Result<Vec<HealthResult>> {
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            results.push(self.check_target(target).await?);
        }
        Ok(results)
    }

    pub async fn check_target(&self, target: &ServiceTarget) -> Result<HealthResult> {
        let start = std::time::Instant::now();

        let response = self
            .retry
            .execute(|| self.client.get(target.url.clone()).send())
            .await
            .with_context(|| format!("health request to {} failed", target.url))?;

        let response_time_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();
        let healthy = status == target.expected_status;

        debug!(
            "{}: HTTP {} (expected {}) in {}ms",
            target.name, status, target.expected_status, response_time_ms
        );

        Ok(HealthResult {
            target: target.clone(),
            healthy,
            response_time_ms,
        })
    }
}

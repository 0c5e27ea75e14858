// src/config/mod.rs
mod models;

pub use models::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Read and validate the monitor configuration. YAML and JSON are both
/// accepted; anything without a yaml/yml extension is parsed as JSON,
/// which keeps old config.json deployments working.
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read monitor config {}", path.display()))?;

    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&contents).context("Monitor config is not valid YAML")?
        }
        _ => serde_json::from_str(&contents).context("Monitor config is not valid JSON")?,
    };

    config.validate()?;
    Ok(config)
}

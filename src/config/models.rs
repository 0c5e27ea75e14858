// src/config/models.rs
use crate::health::ServiceTarget;
use anyhow::{bail, Result};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Chat platform bot credential
    pub token: String,
    /// Destination channel for down alerts
    pub channel: u64,
    /// User mentioned in every alert
    pub owner: u64,
    #[serde(default)]
    pub check: CheckConfig,
    #[serde(default = "default_targets")]
    pub targets: Vec<ServiceTarget>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Per-request timeout. `None` inherits the HTTP client default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per request. 1 means no retries.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,
}

fn default_interval_secs() -> u64 {
    300
}

fn default_max_attempts() -> u32 {
    1
}

fn default_backoff_base_ms() -> u64 {
    200
}

fn default_backoff_max_ms() -> u64 {
    2_000
}

fn default_targets() -> Vec<ServiceTarget> {
    vec![
        ServiceTarget {
            name: "Composite".to_string(),
            url: Url::parse("https://composite.seabase.xyz/health")
                .expect("built-in target URL is valid"),
            expected_status: 200,
        },
        ServiceTarget {
            name: "Kiwi AI".to_string(),
            url: Url::parse("https://kiwialpha.seabase.xyz/health")
                .expect("built-in target URL is valid"),
            // This endpoint 404s when alive; preserved as configured.
            expected_status: 404,
        },
    ]
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            timeout_secs: None,
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_max_ms: default_backoff_max_ms(),
        }
    }
}

impl CheckConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            bail!("token must not be empty");
        }
        if self.targets.is_empty() {
            bail!("at least one target is required");
        }
        for target in &self.targets {
            if target.name.is_empty() {
                bail!("target name must not be empty");
            }
            if !(100..=599).contains(&target.expected_status) {
                bail!(
                    "target {}: expected_status {} is not a valid HTTP status code",
                    target.name,
                    target.expected_status
                );
            }
        }
        if self.check.interval_secs == 0 {
            bail!("check.interval_secs must be greater than zero");
        }
        if self.check.retry.max_attempts == 0 {
            bail!("check.retry.max_attempts must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str(
            "token: abc\nchannel: 123\nowner: 456\n",
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.check.interval_secs, 300);
        assert_eq!(config.check.timeout_secs, None);
        assert_eq!(config.check.retry.max_attempts, 1);
        assert_eq!(config.targets.len(), 2);
        assert_eq!(config.targets[0].name, "Composite");
        assert_eq!(config.targets[0].expected_status, 200);
        assert_eq!(config.targets[1].name, "Kiwi AI");
        assert_eq!(config.targets[1].expected_status, 404);
    }

    #[test]
    fn missing_token_is_an_error() {
        let result: Result<Config, _> =
            serde_yaml::from_str("channel: 123\nowner: 456\n");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bogus_expected_status() {
        let yaml = "token: abc\nchannel: 123\nowner: 456\ntargets:\n  - name: broken\n    url: http://localhost/health\n    expected_status: 7\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn json_config_also_parses() {
        let config: Config = serde_json::from_str(
            r#"{"token": "abc", "channel": 1, "owner": 2,
                "check": {"interval_secs": 60, "timeout_secs": 5}}"#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.check.interval(), Duration::from_secs(60));
        assert_eq!(config.check.timeout(), Some(Duration::from_secs(5)));
    }
}

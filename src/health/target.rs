// src/health/target.rs
use serde::Deserialize;
use url::Url;

/// One monitored endpoint. Built from configuration at startup and
/// immutable afterward.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceTarget {
    pub name: String,
    pub url: Url,
    /// The status code this endpoint returns when it is up. Not
    /// necessarily 200: an endpoint may signal health with any code.
    pub expected_status: u16,
}

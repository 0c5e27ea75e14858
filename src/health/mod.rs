// src/health/mod.rs
mod checker;
mod retry;
mod target;

pub use checker::{HealthChecker, HealthResult};
pub use retry::RetryStrategy;
pub use target::ServiceTarget;

// src/notify/mod.rs
mod notifier;

pub use notifier::Notifier;

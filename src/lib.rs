// src/lib.rs
pub mod chat;
pub mod commands;
pub mod config;
pub mod context;
pub mod health;
pub mod notify;

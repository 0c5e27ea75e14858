// src/chat/mod.rs
mod client;
mod discord;

pub use client::{ChannelHandle, ChatClient, ChatError};
pub use discord::DiscordClient;

// src/chat/client.rs
use async_trait::async_trait;

/// A channel that has been resolved and can receive messages.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    pub id: u64,
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Channel {0} not found")]
    DestinationNotFound(u64),

    #[error("Chat API returned HTTP {0}")]
    Api(u16),

    #[error("Chat transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Seam over the messaging platform. The monitor only needs to look up
/// its destination and post text to it.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn resolve_channel(&self, id: u64) -> Result<ChannelHandle, ChatError>;

    async fn send_message(
        &self,
        channel: &ChannelHandle,
        content: &str,
    ) -> Result<(), ChatError>;
}

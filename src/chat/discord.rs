// src/chat/discord.rs
use crate::chat::{ChannelHandle, ChatClient, ChatError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://discord.com/api/v10";

/// Discord REST client. Covers the two calls the monitor needs: channel
/// lookup and message posting.
pub struct DiscordClient {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Channel {
    name: Option<String>,
}

impl DiscordClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }
}

#[async_trait]
impl ChatClient for DiscordClient {
    async fn resolve_channel(&self, id: u64) -> Result<ChannelHandle, ChatError> {
        let url = format!("{}/channels/{}", self.base_url, id);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ChatError::DestinationNotFound(id)),
            status if !status.is_success() => Err(ChatError::Api(status.as_u16())),
            _ => {
                let channel: Channel = response.json().await?;
                debug!("Resolved channel {} ({:?})", id, channel.name);
                Ok(ChannelHandle {
                    id,
                    name: channel.name,
                })
            }
        }
    }

    async fn send_message(
        &self,
        channel: &ChannelHandle,
        content: &str,
    ) -> Result<(), ChatError> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel.id);
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Api(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_channel_by_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/channels/42")
            .match_header("Authorization", "Bot secret")
            .with_status(200)
            .with_body(r#"{"id": "42", "name": "alerts"}"#)
            .create_async()
            .await;

        let client = DiscordClient::new("secret").with_base_url(server.url());
        let channel = client.resolve_channel(42).await.unwrap();

        assert_eq!(channel.id, 42);
        assert_eq!(channel.name.as_deref(), Some("alerts"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_channel_maps_to_destination_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/channels/42")
            .with_status(404)
            .with_body(r#"{"message": "Unknown Channel", "code": 10003}"#)
            .create_async()
            .await;

        let client = DiscordClient::new("secret").with_base_url(server.url());
        let error = client.resolve_channel(42).await.unwrap_err();

        assert!(matches!(error, ChatError::DestinationNotFound(42)));
    }

    #[tokio::test]
    async fn posts_message_content_as_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/channels/42/messages")
            .match_header("Authorization", "Bot secret")
            .match_body(mockito::Matcher::Json(
                serde_json::json!({ "content": "hello" }),
            ))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = DiscordClient::new("secret").with_base_url(server.url());
        let channel = ChannelHandle { id: 42, name: None };
        client.send_message(&channel, "hello").await.unwrap();

        mock.assert_async().await;
    }
}

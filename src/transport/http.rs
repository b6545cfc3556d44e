//! HTTP chat transport.
//!
//! Thin reqwest wrapper around `POST /api/chat`. Pure parsing lives in
//! `parse_reply` for testability.

use std::time::Duration;

use super::config::ChatConfig;
use super::types::{ChatReply, ChatRequest, ChatTransport, TransportError};

const CHAT_PATH: &str = "/api/chat";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpChatTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpChatTransport {
    /// Build a transport for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &ChatConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The shared HTTP client, reused by the laws download.
    #[must_use]
    pub fn client(&self) -> &reqwest::Client {
        &self.http
    }
}

#[async_trait::async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, message: &str, conversation_id: Option<&str>) -> Result<ChatReply, TransportError> {
        let url = format!("{}{CHAT_PATH}", self.base_url);
        let body = ChatRequest { message, conversation_id };
        tracing::debug!(%url, has_conversation = conversation_id.is_some(), "sending chat turn");

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "chat API returned error status");
            return Err(TransportError::Http { status: status.as_u16() });
        }

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        parse_reply(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_reply(json: &str) -> Result<ChatReply, TransportError> {
    serde_json::from_str(json).map_err(|e| TransportError::Network(format!("malformed reply body: {e}")))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

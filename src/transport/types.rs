//! Transport types — wire shapes for the chat endpoint, the reply handed to
//! the formatter, and the error surfaced to the view.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by a chat transport. The view collapses all of them into
/// one apology message; the variants exist for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The API answered with a non-2xx status.
    #[error("chat API returned status {status}")]
    Http { status: u16 },

    /// Connection, DNS, timeout, or an unparsable response body.
    #[error("chat API request failed: {0}")]
    Network(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Body of `POST /api/chat`. `conversation_id` is serialized as `null` on the
/// first turn.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
    pub conversation_id: Option<&'a str>,
}

/// A successful reply from the chat API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sources: Vec<String>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// TRANSPORT TRAIT
// =============================================================================

/// One network exchange per call. No retry, no queueing. Enables mocking in
/// tests.
#[async_trait::async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a tagged user message, forwarding the server-issued conversation
    /// id when one exists.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] for a non-2xx status and
    /// [`TransportError::Network`] for transport or decode failures.
    async fn send(&self, message: &str, conversation_id: Option<&str>) -> Result<ChatReply, TransportError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

//! Transport — the single network exchange behind a chat turn.
//!
//! DESIGN
//! ======
//! `ChatTransport` is the seam the session calls through; `HttpChatTransport`
//! is the production implementation and tests substitute scripted mocks.
//! Failures surface immediately: no retry, no backoff, no queue.

pub mod config;
pub mod http;
pub mod types;

pub use config::{ChatConfig, ChatTimeouts, ConfigError};
pub use http::HttpChatTransport;
pub use types::{ChatReply, ChatTransport, TransportError};

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use std::sync::Mutex;

    /// Transport that replays scripted outcomes and records what it was sent.
    pub struct MockTransport {
        outcomes: Mutex<Vec<Result<ChatReply, TransportError>>>,
        pub sent: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockTransport {
        pub fn new(outcomes: Vec<Result<ChatReply, TransportError>>) -> Self {
            Self { outcomes: Mutex::new(outcomes), sent: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait::async_trait]
    impl ChatTransport for MockTransport {
        async fn send(&self, message: &str, conversation_id: Option<&str>) -> Result<ChatReply, TransportError> {
            self.sent
                .lock()
                .unwrap()
                .push((message.to_owned(), conversation_id.map(str::to_owned)));
            let mut outcomes = self.outcomes.lock().unwrap();
            if outcomes.is_empty() {
                Err(TransportError::Network("no scripted outcome".into()))
            } else {
                outcomes.remove(0)
            }
        }
    }

    /// Transport whose send never resolves.
    pub struct HangingTransport;

    #[async_trait::async_trait]
    impl ChatTransport for HangingTransport {
        async fn send(&self, _message: &str, _conversation_id: Option<&str>) -> Result<ChatReply, TransportError> {
            std::future::pending().await
        }
    }

    /// Reply with the given conversation id and no sources.
    #[must_use]
    pub fn reply(answer: &str, conversation_id: &str) -> ChatReply {
        ChatReply {
            answer: answer.to_owned(),
            sources: Vec::new(),
            disclaimer: None,
            conversation_id: Some(conversation_id.to_owned()),
        }
    }
}

//! Chat session — topic category, conversation continuity, and the one-slot
//! in-flight gate.
//!
//! DESIGN
//! ======
//! The session is a plain value owned by the view; nothing is process-global.
//! `begin_turn` takes the single permit and `complete_turn` returns it on
//! every outcome. Each category change bumps `epoch`, and a turn token
//! remembers the epoch it was issued under, so a reply that lands after the
//! user switched topics is discarded instead of writing its conversation id
//! into the new session.
//!
//! `send_turn` pairs the network call with `complete_turn` and releases the
//! permit on drop, so an abandoned future cannot wedge the session either.
//! `run_turn` is begin + send for callers with nothing to do in between.

use crate::category::Category;
use crate::transport::{ChatReply, ChatTransport, TransportError};

// =============================================================================
// ERRORS
// =============================================================================

/// Local precondition failures. The UI ignores these silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a chat turn is already in flight")]
    AlreadyInFlight,
    #[error("message is empty")]
    EmptyMessage,
    #[error("no category selected")]
    NoCategorySelected,
}

/// Failure of a whole turn driven by [`ChatSession::run_turn`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

// =============================================================================
// TURN TOKEN
// =============================================================================

/// Issued by [`ChatSession::begin_turn`]; hand it back to
/// [`ChatSession::complete_turn`] exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    message: String,
    conversation_id: Option<String>,
    epoch: u64,
}

impl Turn {
    /// User text prefixed with the category tag.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, Default)]
pub struct ChatSession {
    category: Option<Category>,
    conversation_id: Option<String>,
    in_flight: bool,
    epoch: u64,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(category: Category) -> Self {
        let mut session = Self::new();
        session.select_category(category);
        session
    }

    /// Start over in `category`: forget the conversation and release the gate.
    pub fn select_category(&mut self, category: Category) {
        self.category = Some(category);
        self.conversation_id = None;
        self.in_flight = false;
        self.epoch = self.epoch.wrapping_add(1);
        tracing::debug!(category = category.slug(), "category selected");
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    #[must_use]
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Take the in-flight permit for `user_text`.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyInFlight`] while another turn is outstanding
    /// - [`SessionError::EmptyMessage`] if the text is blank after trimming
    /// - [`SessionError::NoCategorySelected`] before any category is chosen
    pub fn begin_turn(&mut self, user_text: &str) -> Result<Turn, SessionError> {
        if self.in_flight {
            return Err(SessionError::AlreadyInFlight);
        }
        let text = user_text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let category = self.category.ok_or(SessionError::NoCategorySelected)?;

        self.in_flight = true;
        tracing::debug!(
            category = category.slug(),
            has_conversation = self.conversation_id.is_some(),
            "turn started"
        );
        Ok(Turn {
            message: category.tag_message(text),
            conversation_id: self.conversation_id.clone(),
            epoch: self.epoch,
        })
    }

    /// Return the permit taken by `turn`. On success the server's
    /// conversation id replaces whatever was stored.
    pub fn complete_turn(&mut self, turn: &Turn, outcome: &Result<ChatReply, TransportError>) {
        if turn.epoch != self.epoch {
            tracing::debug!("discarding reply from a previous category");
            return;
        }
        if let Ok(reply) = outcome {
            self.conversation_id.clone_from(&reply.conversation_id);
        }
        self.in_flight = false;
    }

    /// Run one full turn through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`TurnError::Session`] if the turn could not start and
    /// [`TurnError::Transport`] if the exchange failed.
    pub async fn run_turn(&mut self, user_text: &str, transport: &dyn ChatTransport) -> Result<ChatReply, TurnError> {
        let turn = self.begin_turn(user_text)?;
        self.send_turn(&turn, transport)
            .await
            .map_err(TurnError::from)
    }

    /// Send a turn already started with [`ChatSession::begin_turn`] and
    /// complete it, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the transport's error after the permit has been released.
    pub async fn send_turn(&mut self, turn: &Turn, transport: &dyn ChatTransport) -> Result<ChatReply, TransportError> {
        let mut permit = Permit { session: self, epoch: turn.epoch };

        let outcome = transport
            .send(turn.message(), turn.conversation_id())
            .await;
        permit.session.complete_turn(turn, &outcome);
        drop(permit);

        outcome
    }
}

/// Releases the in-flight gate if the owning future is dropped mid-send.
struct Permit<'a> {
    session: &'a mut ChatSession,
    epoch: u64,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if self.session.epoch == self.epoch {
            self.session.in_flight = false;
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

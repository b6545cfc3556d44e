//! Chat view — the consumer side of a conversation.
//!
//! DESIGN
//! ======
//! Owns the session and the append-only message log. `submit` runs the full
//! sequence for one user message: gate check, echo the user text, disable
//! input, show the typing placeholder, send, release the gate, swap the
//! placeholder for the formatted reply (or the fixed apology), re-enable
//! input. Rejected submissions leave the log untouched. A `submit` dropped
//! mid-send (timeout, cancellation) still clears the placeholder and
//! re-enables input; the echoed user message stays in the log.
//!
//! The log renders to a standalone HTML document for transcript export; the
//! terminal front end prints the plain-text form alongside.

use uuid::Uuid;

use crate::category::Category;
use crate::format::{self, APOLOGY_HTML};
use crate::html::HtmlFragment;
use crate::session::{ChatSession, SessionError};
use crate::transport::{ChatReply, ChatTransport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn css_class(self) -> &'static str {
        match self {
            Self::User => "message-user",
            Self::Assistant => "message-ai",
        }
    }

    fn avatar(self) -> &'static str {
        match self {
            Self::User => "나",
            Self::Assistant => "AI",
        }
    }
}

/// One entry in the log. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub rendered: HtmlFragment,
}

/// What happened to a submitted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Precondition failed; nothing was appended.
    Ignored(SessionError),
    Answered(ChatReply),
    /// Transport failed; the apology message was appended.
    Failed(TransportError),
}

pub struct ChatView {
    session: ChatSession,
    messages: Vec<ChatMessage>,
    typing: Option<Uuid>,
    input_enabled: bool,
}

impl ChatView {
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            session: ChatSession::with_category(category),
            messages: Vec::new(),
            typing: None,
            input_enabled: true,
        }
    }

    /// Switch topics. Returns `false` (and does nothing) if `category` is
    /// already selected.
    pub fn change_category(&mut self, category: Category) -> bool {
        if self.session.category() == Some(category) {
            return false;
        }
        self.session.select_category(category);
        self.messages.clear();
        self.typing = None;
        self.input_enabled = true;
        true
    }

    #[must_use]
    pub fn session(&self) -> &ChatSession {
        &self.session
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn typing_indicator(&self) -> Option<Uuid> {
        self.typing
    }

    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// The welcome panel is visible until the first message lands.
    #[must_use]
    pub fn welcome_visible(&self) -> bool {
        self.messages.is_empty()
    }

    /// Look up the `index`th (zero-based) example prompt of the current category.
    #[must_use]
    pub fn example(&self, index: usize) -> Option<&'static str> {
        let category = self.session.category()?;
        category.examples().get(index).map(|e| e.question)
    }

    pub fn append(&mut self, role: Role, rendered: HtmlFragment) {
        self.messages.push(ChatMessage { role, rendered });
    }

    pub fn show_typing(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.typing = Some(id);
        id
    }

    /// Remove the placeholder if it is still the one identified by `id`.
    pub fn remove_typing(&mut self, id: Uuid) {
        if self.typing == Some(id) {
            self.typing = None;
        }
    }

    /// Run one user message through the session and transport.
    pub async fn submit(&mut self, text: &str, transport: &dyn ChatTransport) -> Submission {
        let turn = match self.session.begin_turn(text) {
            Ok(turn) => turn,
            Err(e) => {
                tracing::debug!(reason = %e, "submission ignored");
                return Submission::Ignored(e);
            }
        };

        self.append(Role::User, HtmlFragment::from_text(text.trim()));
        self.input_enabled = false;
        let typing = self.show_typing();

        let mut pending = PendingReply { view: self, typing };
        let outcome = pending.view.session.send_turn(&turn, transport).await;
        drop(pending);

        match outcome {
            Ok(reply) => {
                self.append(Role::Assistant, format::format_reply(&reply));
                Submission::Answered(reply)
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat turn failed");
                let mut apology = HtmlFragment::new();
                apology.raw(APOLOGY_HTML);
                self.append(Role::Assistant, apology);
                Submission::Failed(e)
            }
        }
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    /// Welcome panel for the current category: intro text plus example buttons.
    #[must_use]
    pub fn welcome_html(&self) -> HtmlFragment {
        let mut html = HtmlFragment::new();
        let Some(category) = self.session.category() else {
            return html;
        };
        let color = category.accent_color();

        html.raw(r#"<div class="chat-welcome"><div class="welcome-icon""#)
            .attr("style", &format!("background: {color}20;"))
            .raw("><i")
            .attr("data-lucide", category.icon())
            .raw(r#" class="icon-xl""#)
            .attr("style", &format!("color: {color};"))
            .raw(r#"></i></div><h3 class="welcome-title""#)
            .attr("style", &format!("color: {color};"))
            .raw(">")
            .text(category.display_name())
            .raw(r#" 상담</h3><p class="welcome-subtitle">"#)
            .text(category.intro_message())
            .raw(r#"</p><p class="example-label">예시 질문을 클릭해 보세요</p><div class="welcome-examples">"#);
        for example in category.examples() {
            html.raw(r#"<button class="example-btn""#)
                .attr("data-question", example.question)
                .raw(r#"><i data-lucide="message-circle" class="icon-xs"></i><span>"#)
                .text(example.label)
                .raw("</span></button>");
        }
        html.raw("</div></div>");
        html
    }

    fn typing_html(id: Uuid) -> HtmlFragment {
        let mut html = HtmlFragment::new();
        html.raw(r#"<div class="message message-ai""#)
            .attr("id", &format!("typing-{id}"))
            .raw(r#"><div class="message-avatar">AI</div><div class="message-content" style="display: flex; gap: 4px; padding: 16px 20px;">"#);
        for delay in ["0s", "0.2s", "0.4s"] {
            html.raw(r#"<span class="typing-dot""#)
                .attr("style", &format!("animation: typingDot 1.4s infinite; animation-delay: {delay};"))
                .raw("></span>");
        }
        html.raw("</div></div>");
        html
    }

    /// The message area: welcome panel or log, plus the typing placeholder.
    #[must_use]
    pub fn messages_html(&self) -> HtmlFragment {
        let mut html = HtmlFragment::new();
        html.raw(r#"<div id="chat-messages" class="chat-messages">"#);
        if self.welcome_visible() {
            html.append(&self.welcome_html());
        }
        for message in &self.messages {
            html.raw(r#"<div class="message "#)
                .raw(message.role.css_class())
                .raw(r#""><div class="message-avatar">"#)
                .raw(message.role.avatar())
                .raw(r#"</div><div class="message-content">"#)
                .append(&message.rendered)
                .raw("</div></div>");
        }
        if let Some(id) = self.typing {
            html.append(&Self::typing_html(id));
        }
        html.raw("</div>");
        html
    }

    /// Standalone HTML document of the conversation.
    #[must_use]
    pub fn render_document(&self) -> String {
        let mut html = HtmlFragment::new();
        html.raw("<!DOCTYPE html>\n<html lang=\"ko\"><head><meta charset=\"utf-8\"><title>");
        if let Some(category) = self.session.category() {
            html.text(category.display_name()).raw(" 상담 · ");
        }
        html.raw("AI 법률 상담</title></head><body>");
        if let Some(category) = self.session.category() {
            html.raw(r#"<header id="chat-category-header"><span"#)
                .attr("class", &format!("category-indicator {}", category.slug()))
                .raw("><i")
                .attr("data-lucide", category.icon())
                .raw(r#"></i><span id="category-name">"#)
                .text(category.display_name())
                .raw("</span></span></header>");
        }
        html.append(&self.messages_html());
        html.raw("</body></html>\n");
        html.into_string()
    }
}

/// Clears the typing placeholder and re-enables input, also when `submit` is
/// dropped mid-send.
struct PendingReply<'a> {
    view: &'a mut ChatView,
    typing: Uuid,
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        self.view.remove_typing(self.typing);
        self.view.input_enabled = true;
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use super::*;
use crate::transport::test_helpers::{HangingTransport, MockTransport, reply};
use crate::transport::{ChatConfig, HttpChatTransport};
use std::time::Duration;

use axum::Router;
use axum::routing::post;
use serde_json::json;

fn traffic_reply() -> ChatReply {
    ChatReply {
        answer: "과실비율은 사고 유형별 인정기준에 따라 정해집니다.".into(),
        sources: vec!["도로교통법".into()],
        disclaimer: Some("일반 정보입니다".into()),
        conversation_id: Some("abc123".into()),
    }
}

fn assert_traffic_answer(view: &ChatView) {
    let messages = view.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[1].role, Role::Assistant);

    let html = messages[1].rendered.as_str();
    assert!(html.contains("과실비율은 사고 유형별 인정기준에 따라 정해집니다."));
    assert_eq!(html.matches("<li ").count(), 1);
    assert!(html.contains(r#"<a href="https://www.law.go.kr/법령/도로교통법""#));
    assert!(html.ends_with("⚠️ 일반 정보입니다</p>"));
}

// =============================================================================
// change_category
// =============================================================================

#[test]
fn new_view_shows_welcome_for_category() {
    let view = ChatView::new(Category::Housing);
    assert!(view.welcome_visible());
    let html = view.welcome_html().into_string();
    assert!(html.contains("임대차법 상담"));
    assert!(html.contains(r#"data-question="전세보증금을 돌려받지 못하면 어떻게 해야 하나요?""#));
    assert!(html.contains("background: #10b98120;"));
}

#[test]
fn change_category_to_same_is_ignored() {
    let mut view = ChatView::new(Category::Labor);
    view.append(Role::User, HtmlFragment::from_text("hi"));
    assert!(!view.change_category(Category::Labor));
    assert_eq!(view.messages().len(), 1);
}

#[test]
fn change_category_clears_log() {
    let mut view = ChatView::new(Category::Labor);
    view.append(Role::User, HtmlFragment::from_text("hi"));
    assert!(view.change_category(Category::Traffic));
    assert!(view.messages().is_empty());
    assert_eq!(view.session().category(), Some(Category::Traffic));
}

#[test]
fn example_lookup_follows_category() {
    let view = ChatView::new(Category::Traffic);
    assert_eq!(view.example(0), Some("교통사고 과실비율은 어떻게 정해지나요?"));
    assert_eq!(view.example(3), None);
}

// =============================================================================
// typing placeholder
// =============================================================================

#[test]
fn remove_typing_only_clears_matching_id() {
    let mut view = ChatView::new(Category::Labor);
    let first = view.show_typing();
    let second = view.show_typing();
    view.remove_typing(first);
    assert_eq!(view.typing_indicator(), Some(second));
    view.remove_typing(second);
    assert!(view.typing_indicator().is_none());
}

#[test]
fn typing_placeholder_is_rendered_but_not_logged() {
    let mut view = ChatView::new(Category::Labor);
    let id = view.show_typing();
    assert!(view.messages().is_empty());
    assert!(view.messages_html().as_str().contains(&format!("typing-{id}")));
}

// =============================================================================
// submit
// =============================================================================

#[tokio::test]
async fn submit_end_to_end_traffic() {
    let transport = MockTransport::new(vec![Ok(traffic_reply())]);
    let mut view = ChatView::new(Category::Traffic);

    let outcome = view.submit("과실비율은 어떻게 정해지나요?", &transport).await;

    assert_eq!(outcome, Submission::Answered(traffic_reply()));
    assert_traffic_answer(&view);
    assert_eq!(
        transport.sent.lock().unwrap()[0],
        ("[교통사고 관련 질문] 과실비율은 어떻게 정해지나요?".to_string(), None)
    );
    assert_eq!(view.session().conversation_id(), Some("abc123"));
    assert!(view.input_enabled());
    assert!(view.typing_indicator().is_none());
    assert!(!view.welcome_visible());
}

#[tokio::test]
async fn submit_failure_appends_apology() {
    let transport = MockTransport::new(vec![Err(TransportError::Http { status: 500 })]);
    let mut view = ChatView::new(Category::Labor);

    let outcome = view.submit("퇴직금은?", &transport).await;

    assert_eq!(outcome, Submission::Failed(TransportError::Http { status: 500 }));
    assert_eq!(view.messages().len(), 2);
    assert_eq!(view.messages()[1].rendered.as_str(), APOLOGY_HTML);
    assert!(!view.session().is_in_flight());
    assert!(view.input_enabled());
}

#[tokio::test]
async fn submit_dropped_mid_send_restores_input() {
    let mut view = ChatView::new(Category::Labor);

    let result = tokio::time::timeout(Duration::from_millis(20), view.submit("질문", &HangingTransport)).await;

    assert!(result.is_err());
    assert!(!view.session().is_in_flight());
    assert!(view.input_enabled());
    assert!(view.typing_indicator().is_none());
    assert_eq!(view.messages().len(), 1);
    assert_eq!(view.messages()[0].role, Role::User);
}

#[tokio::test]
async fn submit_blank_is_ignored_without_logging() {
    let transport = MockTransport::new(vec![]);
    let mut view = ChatView::new(Category::Labor);

    let outcome = view.submit("   ", &transport).await;

    assert_eq!(outcome, Submission::Ignored(SessionError::EmptyMessage));
    assert!(view.messages().is_empty());
    assert!(transport.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn submit_escapes_user_text() {
    let transport = MockTransport::new(vec![Ok(reply("ok", "c1"))]);
    let mut view = ChatView::new(Category::Labor);

    view.submit("<b>굵게</b>", &transport).await;

    assert_eq!(view.messages()[0].rendered.as_str(), "&lt;b&gt;굵게&lt;/b&gt;");
}

#[tokio::test]
async fn submit_end_to_end_over_http() {
    let app = Router::new().route(
        "/api/chat",
        post(|axum::Json(body): axum::Json<serde_json::Value>| async move {
            assert_eq!(body["message"], "[교통사고 관련 질문] 과실비율은 어떻게 정해지나요?");
            axum::Json(json!({
                "answer": "과실비율은 사고 유형별 인정기준에 따라 정해집니다.",
                "sources": ["도로교통법"],
                "disclaimer": "일반 정보입니다",
                "conversation_id": "abc123"
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let transport = HttpChatTransport::new(&ChatConfig::default().with_base_url(&format!("http://{addr}"))).unwrap();
    let mut view = ChatView::new(Category::Traffic);

    let outcome = view.submit("과실비율은 어떻게 정해지나요?", &transport).await;

    assert!(matches!(outcome, Submission::Answered(_)));
    assert_traffic_answer(&view);
}

// =============================================================================
// render_document
// =============================================================================

#[tokio::test]
async fn document_contains_header_and_log() {
    let transport = MockTransport::new(vec![Ok(traffic_reply())]);
    let mut view = ChatView::new(Category::Traffic);
    view.submit("과실비율은?", &transport).await;

    let doc = view.render_document();

    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains(r#"class="category-indicator traffic""#));
    assert!(doc.contains(r#"<div class="message message-user"><div class="message-avatar">나</div>"#));
    assert!(doc.contains(r#"<div class="message message-ai"><div class="message-avatar">AI</div>"#));
    assert!(!doc.contains("chat-welcome"));
}

#[test]
fn empty_document_shows_welcome() {
    let view = ChatView::new(Category::Consumer);
    let doc = view.render_document();
    assert!(doc.contains("chat-welcome"));
    assert!(doc.contains("<title>소비자보호법 상담 · AI 법률 상담</title>"));
}

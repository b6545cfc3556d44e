use super::*;
use crate::transport::config::ChatTimeouts;

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};

// =============================================================================
// HELPERS
// =============================================================================

type Captured = Arc<Mutex<Vec<Value>>>;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn transport_for(base_url: &str) -> HttpChatTransport {
    HttpChatTransport::new(&ChatConfig::default().with_base_url(base_url)).unwrap()
}

async fn echo_chat(State(captured): State<Captured>, axum::Json(body): axum::Json<Value>) -> axum::Json<Value> {
    captured.lock().unwrap().push(body);
    axum::Json(json!({
        "answer": "과실비율은 사고 유형별 기준표에 따릅니다.",
        "sources": ["도로교통법"],
        "disclaimer": "일반 정보입니다",
        "conversation_id": "abc123"
    }))
}

// =============================================================================
// parse_reply
// =============================================================================

#[test]
fn parse_reply_malformed_is_network_error() {
    let err = parse_reply("<html>bad gateway</html>").unwrap_err();
    assert!(matches!(err, TransportError::Network(msg) if msg.contains("malformed reply body")));
}

#[test]
fn parse_reply_ok() {
    let reply = parse_reply(r#"{"answer":"A","sources":[],"disclaimer":null,"conversation_id":"c1"}"#).unwrap();
    assert_eq!(reply.answer, "A");
    assert_eq!(reply.conversation_id.as_deref(), Some("c1"));
}

// =============================================================================
// construction
// =============================================================================

#[test]
fn new_trims_base_url() {
    let transport = transport_for("http://api.test/");
    assert_eq!(transport.base_url(), "http://api.test");
}

#[test]
fn new_accepts_explicit_timeouts() {
    let config = ChatConfig::default().with_timeouts(ChatTimeouts { request_secs: Some(5), connect_secs: Some(1) });
    assert!(HttpChatTransport::new(&config).is_ok());
}

// =============================================================================
// send
// =============================================================================

#[tokio::test]
async fn send_posts_json_and_parses_reply() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route("/api/chat", post(echo_chat))
        .with_state(captured.clone());
    let transport = transport_for(&serve(app).await);

    let reply = transport
        .send("[교통사고 관련 질문] 과실비율은?", None)
        .await
        .unwrap();

    assert_eq!(reply.sources, vec!["도로교통법".to_string()]);
    assert_eq!(reply.conversation_id.as_deref(), Some("abc123"));
    let bodies = captured.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0], json!({ "message": "[교통사고 관련 질문] 과실비율은?", "conversation_id": null }));
}

#[tokio::test]
async fn send_forwards_conversation_id() {
    let captured: Captured = Arc::default();
    let app = Router::new()
        .route("/api/chat", post(echo_chat))
        .with_state(captured.clone());
    let transport = transport_for(&serve(app).await);

    transport.send("hi", Some("abc123")).await.unwrap();

    assert_eq!(captured.lock().unwrap()[0]["conversation_id"], "abc123");
}

#[tokio::test]
async fn send_non_2xx_is_http_error() {
    let app = Router::new().route("/api/chat", post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "warming up") }));
    let transport = transport_for(&serve(app).await);

    let err = transport.send("hi", None).await.unwrap_err();
    assert_eq!(err, TransportError::Http { status: 503 });
}

#[tokio::test]
async fn send_malformed_body_is_network_error() {
    let app = Router::new().route("/api/chat", post(|| async { "not json" }));
    let transport = transport_for(&serve(app).await);

    let err = transport.send("hi", None).await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

#[tokio::test]
async fn send_refused_connection_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let transport = transport_for(&format!("http://{addr}"));

    let err = transport.send("hi", None).await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}

//! HttpJournalApi against an in-process mock backend

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use diarist_api_bridge::{
    ApiError, ClientConfig, DialogueMode, HttpJournalApi, JournalApi, LogCategory,
};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

async fn chat(Json(body): Json<Value>) -> Json<Value> {
    let text = body["text"].as_str().unwrap_or_default().to_string();
    let drafting = text.starts_with("log:");
    Json(json!({
        "reply": format!("echo: {}", text),
        "state": if drafting { "S2" } else { "S1" },
        "saved": text == "confirm",
    }))
}

async fn derived(Path(category): Path<String>) -> axum::response::Response {
    match category.as_str() {
        "tasks" => Json(json!({ "content": "- buy milk" })).into_response(),
        "feedback" => Json(json!({})).into_response(),
        "events" => (StatusCode::OK, "not json").into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

/// Serve the mock on an ephemeral port and return a client pointed at it
async fn spawn_backend() -> HttpJournalApi {
    let app = Router::new()
        .route("/api/chat", post(chat))
        .route("/api/derived/:category", get(derived));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let mut config = ClientConfig::default();
    config.apply_api_base_override(&format!("http://{}/api/", addr));
    config.validate().unwrap();
    HttpJournalApi::new(&config)
}

#[tokio::test]
async fn test_chat_posts_text_and_decodes_reply() {
    let api = spawn_backend().await;

    let reply = assert_ok!(api.chat("hello").await);
    assert_eq!(reply.reply, "echo: hello");
    assert_eq!(reply.mode(), Some(DialogueMode::Chat));
    assert!(!reply.saved);

    // Marker prefix travels untouched
    let reply = assert_ok!(api.chat("-what happened yesterday").await);
    assert_eq!(reply.reply, "echo: -what happened yesterday");
}

#[tokio::test]
async fn test_chat_reports_draft_and_save() {
    let api = spawn_backend().await;

    let reply = assert_ok!(api.chat("log: dentist at 3").await);
    assert_eq!(reply.mode(), Some(DialogueMode::Drafting));

    let reply = assert_ok!(api.chat("confirm").await);
    assert!(reply.saved);
}

#[tokio::test]
async fn test_derived_log_content() {
    let api = spawn_backend().await;

    let log = assert_ok!(api.derived_log(LogCategory::Tasks).await);
    assert_eq!(log.into_text(), "- buy milk");

    let log = assert_ok!(api.derived_log(LogCategory::Feedback).await);
    assert_eq!(log.into_text(), "");
}

#[tokio::test]
async fn test_derived_log_errors() {
    let api = spawn_backend().await;

    let err = assert_err!(api.derived_log(LogCategory::Events).await);
    assert!(matches!(err, ApiError::Decode(_)));

    let err = assert_err!(api.derived_log(LogCategory::Goals).await);
    assert_eq!(
        err,
        ApiError::Status {
            code: 500,
            body: "boom".to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = ClientConfig::default();
    config.apply_api_base_override(&format!("http://{}/api", addr));
    config.connect_timeout_secs = 2;
    let api = HttpJournalApi::new(&config);

    let err = assert_err!(api.chat("hello").await);
    assert!(matches!(err, ApiError::Transport(_)));
}

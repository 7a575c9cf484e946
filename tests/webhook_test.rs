//! Webhook endpoint tests
//! Run with: cargo test --test webhook_test

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use card_utility_bot::application::commands::replies;
use card_utility_bot::application::messaging::InboundAdapter;
use card_utility_bot::application::services::CommandRouter;
use card_utility_bot::infrastructure::config::Config;
use card_utility_bot::infrastructure::webhook::{build_router, WebhookState, GREETING, SECRET_HEADER};
use common::{ensure_init, sample_record, RecordingBot, StubLookup, OWNER_ID};

fn app_with(router: CommandRouter, secret_token: Option<&str>) -> (Router, Arc<RecordingBot>) {
    ensure_init();
    let bot = Arc::new(RecordingBot::default());
    let state = WebhookState {
        router: Arc::new(router),
        inbound: Arc::new(InboundAdapter::default()),
        bot: bot.clone(),
        secret_token: secret_token.map(str::to_string),
    };
    (build_router(state), bot)
}

fn app() -> (Router, Arc<RecordingBot>) {
    app_with(
        CommandRouter::builtin(Some(OWNER_ID), "owner", StubLookup::ok(sample_record())),
        None,
    )
}

async fn post(app: Router, body: impl Into<String>) -> (StatusCode, String) {
    post_with(app, None, body).await
}

async fn post_with(app: Router, secret: Option<&str>, body: impl Into<String>) -> (StatusCode, String) {
    let mut request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        request = request.header(SECRET_HEADER, secret);
    }
    let res = app
        .oneshot(request.body(Body::from(body.into())).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let body = res.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_liveness_greeting() {
    let (app, _) = app();
    let res = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], GREETING.as_bytes());
}

#[tokio::test]
async fn test_missing_chat_id_is_bad_request() {
    let (app, bot) = app();
    let (status, body) = post(app, r#"{"message": {"text": "/check 4532015112830366"}}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body.is_empty());
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_missing_text_is_bad_request() {
    let (app, bot) = app();
    let (status, _) = post(app, r#"{"message": {"chat": {"id": 42}}}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let (app, bot) = app();
    let (status, _) = post(app, "not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bot.sent().is_empty());
}

#[tokio::test]
async fn test_unknown_command_acknowledged() {
    let (app, bot) = app();
    let (status, body) = post(app, r#"{"message": {"chat": {"id": 42}, "text": "/unknowncmd"}}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 42);
    assert_eq!(sent[0].text, replies::UNKNOWN_COMMAND);
}

#[tokio::test]
async fn test_check_delivered_to_chat() {
    let (app, bot) = app();
    let (status, _) = post(
        app,
        r#"{"message": {"chat": {"id": 42}, "text": "/check 4532015112830366"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let sent = bot.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 42);
    assert!(sent[0].text.contains("Valid ✅"));
}

#[tokio::test]
async fn test_owner_command_via_webhook_requires_owner_sender() {
    let (app, bot) = app();
    let (status, _) = post(app, r#"{"message": {"chat": {"id": 9}, "text": "/status"}}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot.sent()[0].text, replies::UNAUTHORIZED);

    let (app, bot) = self::app();
    let body = format!(
        r#"{{"message": {{"chat": {{"id": 9}}, "from": {{"id": {}}}, "text": "/status"}}}}"#,
        OWNER_ID
    );
    let (status, _) = post(app, body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bot.sent()[0].text.contains("running smoothly"));
}

#[tokio::test]
async fn test_inline_sends_keyboard() {
    let (app, bot) = app();
    let (status, _) = post(app, r#"{"message": {"chat": {"id": 5}, "text": "/inline"}}"#).await;
    assert_eq!(status, StatusCode::OK);

    let sent = bot.sent();
    let keyboard = sent[0].keyboard.as_ref().expect("keyboard attached");
    assert_eq!(keyboard.len(), 3);
}

#[tokio::test]
async fn test_callback_query_answered_and_routed() {
    let (app, bot) = app();
    let (status, _) = post(
        app,
        r#"{"callback_query": {"id": "cb-7", "from": {"id": 3}, "message": {"chat": {"id": 5}}, "data": "generate"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot.answered(), vec!["cb-7"]);
    assert!(bot.sent()[0].text.contains("generated credit card number"));
}

#[tokio::test]
async fn test_default_config_denies_anonymous_owner_commands() {
    let config = Config::default();
    let (app, bot) = app_with(
        CommandRouter::builtin(config.owner.id, &config.owner.name, StubLookup::ok(sample_record())),
        None,
    );

    let (status, _) = post(app, r#"{"message": {"chat": {"id": 9}, "text": "/status"}}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot.sent()[0].text, replies::UNAUTHORIZED);

    let (app, bot) = app_with(
        CommandRouter::builtin(config.owner.id, &config.owner.name, StubLookup::ok(sample_record())),
        None,
    );
    post(
        app,
        r#"{"message": {"chat": {"id": 9}, "from": {"id": 0}, "text": "/credits"}}"#,
    )
    .await;
    assert_eq!(bot.sent()[0].text, replies::UNAUTHORIZED);
}

fn signed_app() -> (Router, Arc<RecordingBot>) {
    app_with(
        CommandRouter::builtin(Some(OWNER_ID), "owner", StubLookup::ok(sample_record())),
        Some("s3cret"),
    )
}

#[tokio::test]
async fn test_secret_token_required_when_configured() {
    let body = format!(
        r#"{{"message": {{"chat": {{"id": 9}}, "from": {{"id": {}}}, "text": "/status"}}}}"#,
        OWNER_ID
    );

    let (app, bot) = signed_app();
    let (status, _) = post(app, body.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(bot.sent().is_empty());

    let (app, bot) = signed_app();
    let (status, _) = post_with(app, Some("guess"), body.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(bot.sent().is_empty());

    let (app, bot) = signed_app();
    let (status, body) = post_with(app, Some("s3cret"), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert!(bot.sent()[0].text.contains("running smoothly"));
}

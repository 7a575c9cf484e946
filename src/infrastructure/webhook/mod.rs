//! Webhook HTTP server

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::messaging::{Inbound, InboundAdapter};
use crate::application::services::{respond, CommandRouter};
use crate::domain::traits::Bot;

/// Body of `GET /`
pub const GREETING: &str = "Welcome to the Credit Card Utility Bot!";

/// Header Telegram uses to echo the webhook secret
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Shared, read-only state for every webhook request
#[derive(Clone)]
pub struct WebhookState {
    pub router: Arc<CommandRouter>,
    pub inbound: Arc<InboundAdapter>,
    pub bot: Arc<dyn Bot>,
    /// When set, updates without a matching `SECRET_HEADER` are rejected
    pub secret_token: Option<String>,
}

pub fn build_router(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/webhook", post(webhook))
        .with_state(state)
}

/// Bind `0.0.0.0:port` and serve until Ctrl-C
pub async fn serve(state: WebhookState, port: u16) -> Result<(), BotError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Webhook server listening on {}", addr);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown requested, stopping webhook server");
            }
        })
        .await
        .map_err(|e| BotError::Server(e.to_string()))
}

async fn home() -> &'static str {
    GREETING
}

async fn webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    if let Some(secret) = &state.secret_token {
        let presented = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        if presented != Some(secret.as_str()) {
            tracing::warn!("Rejected webhook request without a valid secret token");
            return (StatusCode::UNAUTHORIZED, "Unauthorized");
        }
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("No valid message data received in the webhook request: {}", e);
            return (StatusCode::BAD_REQUEST, "No valid message data received");
        }
    };
    tracing::info!("Received webhook data: {}", payload);

    let event = match state.inbound.normalize(Inbound::Webhook(payload)) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Chat ID or text missing in the message: {}", e);
            return (StatusCode::BAD_REQUEST, "Chat ID or text missing");
        }
    };
    tracing::info!(
        "Received message from chat_id {}: /{} {}",
        event.request.chat_id,
        event.request.command,
        event.request.args.join(" ")
    );

    respond(state.bot.as_ref(), &state.router, &event).await;
    (StatusCode::OK, "OK")
}

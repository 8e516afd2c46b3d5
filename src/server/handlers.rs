//! HTTP handlers for the chat API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::api::{ChatResponse, EndRequest, HealthResponse, RestartRequest, SendRequest};
use super::ServerError;
use crate::session::ChatService;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub chat: ChatService,
}

impl AppState {
    #[must_use]
    pub fn new(chat: ChatService) -> Self {
        Self { chat }
    }
}

/// Use the caller's session id, or mint one.
fn resolve_session_id(session_id: Option<String>) -> String {
    session_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}

/// POST /api/chat/send - Answer one message.
pub async fn post_send(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<ChatResponse>, ServerError> {
    let session_id = resolve_session_id(request.session_id);
    let exchange = state
        .chat
        .send_message(&session_id, &request.message)
        .await?;

    Ok(Json(ChatResponse {
        session_id,
        user_message: Some(request.message),
        bot_response: exchange.reply,
    }))
}

/// POST /api/chat/restart - Reset the conversation and greet.
pub async fn post_restart(
    State(state): State<AppState>,
    request: Option<Json<RestartRequest>>,
) -> Result<Json<ChatResponse>, ServerError> {
    let session_id = resolve_session_id(request.and_then(|Json(r)| r.session_id));
    let exchange = state.chat.restart(&session_id).await?;

    Ok(Json(ChatResponse {
        session_id,
        user_message: None,
        bot_response: exchange.reply,
    }))
}

/// POST /api/chat/end - Forget a conversation.
pub async fn post_end(
    State(state): State<AppState>,
    Json(request): Json<EndRequest>,
) -> Result<StatusCode, ServerError> {
    state.chat.end(request.session_id.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/health - Liveness and knowledge counts.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.chat.engine().store();
    Json(HealthResponse {
        status: "ok".to_string(),
        careers: store.list_career_keys().len(),
        faqs: store.faq_count(),
        load_errors: store.load_errors().len(),
    })
}

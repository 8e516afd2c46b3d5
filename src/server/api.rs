//! Request and response bodies for the chat endpoints.

use serde::{Deserialize, Serialize};

use crate::dialogue::BotReply;

/// Body of `POST /api/chat/send`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Missing and empty messages are both rejected by validation.
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /api/chat/restart`. The body itself is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestartRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of `POST /api/chat/end`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndRequest {
    pub session_id: String,
}

/// Envelope returned by both chat endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    pub bot_response: BotReply,
}

/// Response for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub careers: usize,
    pub faqs: usize,
    pub load_errors: usize,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

//! Conversation slot state and the engine's input/output units.

use serde::{Deserialize, Serialize};

use super::Transcript;

/// Pending-slot state of a conversation.
///
/// Holds at most one outstanding request: the career whose regime the
/// engine is waiting for. Absence means free-form matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(
        rename = "awaitingRegimeForCareer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    awaiting_regime_for_career: Option<String>,
}

impl ConversationState {
    /// State waiting for a regime choice for `career_key`.
    #[must_use]
    pub fn awaiting(career_key: impl Into<String>) -> Self {
        Self {
            awaiting_regime_for_career: Some(career_key.into()),
        }
    }

    /// Career whose regime is awaited, if any.
    #[must_use]
    pub fn awaiting_regime(&self) -> Option<&str> {
        self.awaiting_regime_for_career.as_deref()
    }

    #[must_use]
    pub fn is_free(&self) -> bool {
        self.awaiting_regime_for_career.is_none()
    }

    pub fn await_regime(&mut self, career_key: impl Into<String>) {
        let career_key = career_key.into();
        tracing::debug!(career = %career_key, "Awaiting regime");
        self.awaiting_regime_for_career = Some(career_key);
    }

    pub fn clear(&mut self) {
        if let Some(career) = self.awaiting_regime_for_career.take() {
            tracing::debug!(career = %career, "Regime slot cleared");
        }
    }
}

/// Everything the engine needs between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueState {
    pub transcript: Transcript,
    pub conversation: ConversationState,
}

/// The engine's reply to one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    pub response: String,
    pub quick_replies: Vec<String>,
}

impl BotReply {
    /// Reply with no suggestions.
    #[must_use]
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            quick_replies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_quick_replies<I, S>(mut self, quick_replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.quick_replies = quick_replies.into_iter().map(Into::into).collect();
        self
    }
}

//! Request-level chat operations over a session store.

use std::sync::Arc;

use super::{ChatError, SessionSnapshot, SessionStore};
use crate::dialogue::{BotReply, DialogueEngine, DialogueState};

/// Result of one chat operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub reply: BotReply,
    /// Transcript length after the exchange, system turn included.
    pub transcript_len: usize,
}

/// Loads a session, runs the engine, saves the session.
///
/// Requests for the same session id are expected to arrive one at a time.
#[derive(Clone)]
pub struct ChatService {
    engine: DialogueEngine,
    sessions: Arc<dyn SessionStore>,
    max_message_len: usize,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("engine", &self.engine)
            .field("max_message_len", &self.max_message_len)
            .finish_non_exhaustive()
    }
}

impl ChatService {
    #[must_use]
    pub fn new(
        engine: DialogueEngine,
        sessions: Arc<dyn SessionStore>,
        max_message_len: usize,
    ) -> Self {
        Self {
            engine,
            sessions,
            max_message_len,
        }
    }

    #[must_use]
    pub fn engine(&self) -> &DialogueEngine {
        &self.engine
    }

    /// Reject empty or overlong messages before the engine sees them.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::EmptyMessage` or `ChatError::MessageTooLong`.
    pub fn validate(&self, message: &str) -> Result<(), ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let len = message.chars().count();
        if len > self.max_message_len {
            return Err(ChatError::MessageTooLong {
                len,
                max: self.max_message_len,
            });
        }
        Ok(())
    }

    /// Answer `message` within session `session_id`, creating it if unknown.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, or `ChatError::Session` if
    /// the session cannot be loaded or saved.
    pub async fn send_message(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<ChatExchange, ChatError> {
        self.validate(message)?;

        let state = match self.sessions.load(session_id).await? {
            Some(snapshot) => snapshot.into_dialogue_state(),
            None => {
                tracing::debug!(session = session_id, "Starting new session");
                DialogueEngine::reset_session()
            }
        };

        let (state, reply) = self.engine.process_message(state, message).await;
        self.persist(session_id, &state).await?;
        Ok(ChatExchange {
            reply,
            transcript_len: state.transcript.len(),
        })
    }

    /// Reset session `session_id` and return the welcome message.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Session` if the session cannot be saved.
    pub async fn restart(&self, session_id: &str) -> Result<ChatExchange, ChatError> {
        let (state, reply) = self.engine.restart().await;
        self.persist(session_id, &state).await?;
        tracing::info!(session = session_id, "Session restarted");
        Ok(ChatExchange {
            reply,
            transcript_len: state.transcript.len(),
        })
    }

    /// Forget session `session_id`.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Session` if the store fails.
    pub async fn end(&self, session_id: &str) -> Result<(), ChatError> {
        self.sessions.remove(session_id).await?;
        Ok(())
    }

    async fn persist(&self, session_id: &str, state: &DialogueState) -> Result<(), ChatError> {
        self.sessions
            .save(session_id, &SessionSnapshot::capture(state))
            .await?;
        Ok(())
    }
}

use std::io;

use thiserror::Error;

/// Errors from session persistence.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session id: {0:?}")]
    InvalidId(String),
    #[error("Failed to access session file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced to callers of the chat service.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Message is too long ({len} characters, max {max})")]
    MessageTooLong { len: usize, max: usize },
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ChatError {
    /// Whether the caller's input was rejected: the message or the session id.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyMessage
                | Self::MessageTooLong { .. }
                | Self::Session(SessionError::InvalidId(_))
        )
    }
}

//! Conversation transcript anchored on the system instruction.

use serde::{Deserialize, Serialize};

use crate::ai::SYSTEM_INSTRUCTION;

/// Author of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }

    fn is_system_instruction(&self) -> bool {
        self.role == Role::User && self.text == SYSTEM_INSTRUCTION
    }
}

/// Ordered list of turns whose first entry is always the system instruction.
///
/// Turn 0 is never removed or duplicated; [`Transcript::restore`] re-seeds it
/// when rebuilding from persisted turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Turn>", into = "Vec<Turn>")]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Fresh transcript holding only the system instruction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            turns: vec![Turn::user(SYSTEM_INSTRUCTION)],
        }
    }

    /// Rebuild from persisted turns, dropping any stored copies of the
    /// system instruction and re-seeding it at index 0.
    #[must_use]
    pub fn restore(turns: Vec<Turn>) -> Self {
        let mut transcript = Self::new();
        let before = turns.len();
        transcript
            .turns
            .extend(turns.into_iter().filter(|t| !t.is_system_instruction()));
        tracing::debug!(
            restored = transcript.turns.len() - 1,
            dropped = before + 1 - transcript.turns.len(),
            "Transcript restored"
        );
        transcript
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    pub fn push_model(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::model(text));
    }

    /// All turns, system instruction included.
    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Turns exchanged after the system instruction.
    #[must_use]
    pub fn exchanged(&self) -> &[Turn] {
        &self.turns[1..]
    }

    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Always false: the system instruction is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Turn>> for Transcript {
    fn from(turns: Vec<Turn>) -> Self {
        Self::restore(turns)
    }
}

impl From<Transcript> for Vec<Turn> {
    fn from(transcript: Transcript) -> Self {
        transcript.turns
    }
}

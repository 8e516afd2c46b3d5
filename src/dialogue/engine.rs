//! Dialogue engine: slot handling, the rule pipeline and the generative fallback.

use std::sync::Arc;

use crate::ai::{ExternalAnswerer, APOLOGY};
use crate::knowledge::KnowledgeStore;

use super::matching::{find_mentioned_career, named_regime, Utterance};
use super::replies::{self, GREETING_TRIGGER};
use super::rules::{curriculum_reply, first_match, regime_clarification, PIPELINE};
use super::{BotReply, ConversationState, DialogueState, Transcript};

/// How an utterance resolves a pending regime slot.
#[derive(Debug)]
enum SlotResolution {
    /// A regime of the awaited career was named.
    Filled(BotReply),
    /// The awaited career no longer exists in the store.
    Stale(String),
    /// A career was mentioned instead; clear and match afresh.
    TopicChange,
    /// Neither a regime nor a career; ask again.
    Reprompt(BotReply),
}

/// Stateless engine mapping `(state, utterance)` to `(state, reply)`.
///
/// Holds only shared read-only collaborators, so one engine serves every
/// conversation concurrently.
#[derive(Clone)]
pub struct DialogueEngine {
    store: Arc<KnowledgeStore>,
    answerer: Arc<dyn ExternalAnswerer>,
}

impl std::fmt::Debug for DialogueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueEngine")
            .field("careers", &self.store.list_career_keys())
            .finish_non_exhaustive()
    }
}

impl DialogueEngine {
    #[must_use]
    pub fn new(store: Arc<KnowledgeStore>, answerer: Arc<dyn ExternalAnswerer>) -> Self {
        Self { store, answerer }
    }

    #[must_use]
    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Fresh state: transcript holding only the system instruction, no slot.
    #[must_use]
    pub fn reset_session() -> DialogueState {
        DialogueState::default()
    }

    /// Reset, then answer the greeting trigger.
    pub async fn restart(&self) -> (DialogueState, BotReply) {
        self.process_message(Self::reset_session(), GREETING_TRIGGER)
            .await
    }

    /// Answer one utterance.
    ///
    /// Appends exactly one user turn before dispatch and one model turn after,
    /// whichever branch produced the reply.
    pub async fn process_message(
        &self,
        state: DialogueState,
        text: &str,
    ) -> (DialogueState, BotReply) {
        let utterance = Utterance::new(text);
        let DialogueState {
            mut transcript,
            mut conversation,
        } = state;

        transcript.push_user(utterance.raw());
        let reply = self
            .dispatch(&mut conversation, &transcript, &utterance)
            .await;
        transcript.push_model(reply.response.clone());

        (
            DialogueState {
                transcript,
                conversation,
            },
            reply,
        )
    }

    async fn dispatch(
        &self,
        conversation: &mut ConversationState,
        transcript: &Transcript,
        utterance: &Utterance,
    ) -> BotReply {
        if let Some(career_key) = conversation.awaiting_regime().map(str::to_owned) {
            match self.resolve_slot(&career_key, utterance) {
                SlotResolution::Filled(reply) => {
                    conversation.clear();
                    return reply;
                }
                SlotResolution::Stale(display_name) => {
                    tracing::warn!(career = %career_key, "Awaited career not in store");
                    conversation.clear();
                    return BotReply::text(replies::curriculum_unavailable(&display_name));
                }
                SlotResolution::Reprompt(reply) => return reply,
                SlotResolution::TopicChange => {
                    // Falls through to the pipeline once; the slot is gone now.
                    tracing::debug!(career = %career_key, "Topic changed while awaiting regime");
                    conversation.clear();
                }
            }
        }

        self.run_pipeline(conversation, transcript, utterance).await
    }

    fn resolve_slot(&self, career_key: &str, utterance: &Utterance) -> SlotResolution {
        let Some(career) = self.store.get_career(career_key) else {
            return SlotResolution::Stale(career_key.to_string());
        };
        if let Some((name, regime)) = named_regime(career, utterance) {
            tracing::debug!(career = %career.key, regime = name, "Regime slot filled");
            return SlotResolution::Filled(curriculum_reply(career, name, regime));
        }
        if find_mentioned_career(&self.store, utterance).is_some() {
            return SlotResolution::TopicChange;
        }
        tracing::debug!(career = %career.key, "Re-asking for regime");
        SlotResolution::Reprompt(regime_clarification(career))
    }

    async fn run_pipeline(
        &self,
        conversation: &mut ConversationState,
        transcript: &Transcript,
        utterance: &Utterance,
    ) -> BotReply {
        if let Some((rule, outcome)) = first_match(PIPELINE, &self.store, utterance) {
            tracing::debug!(rule, "Local rule matched");
            if let Some(career_key) = outcome.await_regime {
                conversation.await_regime(career_key);
            }
            return outcome.reply;
        }
        self.fallback(transcript, utterance).await
    }

    async fn fallback(&self, transcript: &Transcript, utterance: &Utterance) -> BotReply {
        if !utterance.in_scope() {
            tracing::debug!("Out-of-scope utterance refused");
            return BotReply::text(replies::OUT_OF_SCOPE);
        }

        tracing::info!(turns = transcript.len(), "Consulting external answerer");
        match self.answerer.generate_reply(transcript.turns()).await {
            Ok(text) => BotReply::text(text),
            Err(e) => {
                tracing::warn!(error = %e, kind = %e.kind(), "External answerer failed");
                BotReply::text(APOLOGY)
            }
        }
    }
}

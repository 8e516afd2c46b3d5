//! Wiring of configuration, knowledge, answerer and sessions.

use std::sync::Arc;

use crate::ai::{AiError, ExternalAnswerer, GeminiAnswerer};
use crate::config::AppConfig;
use crate::dialogue::DialogueEngine;
use crate::knowledge::KnowledgeStore;
use crate::session::{store_from_config, ChatService};

/// Everything a front end needs to serve conversations.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub config: AppConfig,
    pub store: Arc<KnowledgeStore>,
    pub chat: ChatService,
}

impl Runtime {
    /// Load knowledge and build the chat service with the Gemini answerer.
    ///
    /// # Errors
    ///
    /// Returns `AiError` if the HTTP client cannot be built.
    pub async fn bootstrap(config: AppConfig) -> Result<Self, AiError> {
        let store = Arc::new(KnowledgeStore::load_all(&config.data).await);
        let mut answerer = GeminiAnswerer::from_config(&config.ai)?;
        if config.ai.few_shot && !store.training_examples().is_empty() {
            answerer = answerer.with_few_shot(store.training_examples().to_vec());
        }
        tracing::info!(
            model = answerer.model(),
            configured = answerer.is_configured(),
            "Generative fallback ready"
        );
        Ok(Self::with_answerer(config, store, Arc::new(answerer)))
    }

    /// Build around an already loaded store and a given answerer.
    #[must_use]
    pub fn with_answerer(
        config: AppConfig,
        store: Arc<KnowledgeStore>,
        answerer: Arc<dyn ExternalAnswerer>,
    ) -> Self {
        let engine = DialogueEngine::new(Arc::clone(&store), answerer);
        let chat = ChatService::new(
            engine,
            store_from_config(&config.session),
            config.chat.max_message_len,
        );
        Self {
            config,
            store,
            chat,
        }
    }
}

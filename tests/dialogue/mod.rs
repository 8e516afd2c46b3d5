//! Dialogue engine tests against the bundled data directory.

mod engine_test;
mod slot_test;
mod transcript_test;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ingechat::ai::{AiError, ExternalAnswerer};
use ingechat::config::DataConfig;
use ingechat::dialogue::{DialogueEngine, Turn};
use ingechat::knowledge::KnowledgeStore;

/// Answerer double that returns a fixed reply (or fails) and records calls.
pub struct ScriptedAnswerer {
    reply: Option<String>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Vec<Turn>>>,
}

impl ScriptedAnswerer {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Transcript passed to the most recent call.
    pub fn last_transcript(&self) -> Option<Vec<Turn>> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ExternalAnswerer for ScriptedAnswerer {
    async fn generate_reply(&self, transcript: &[Turn]) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(transcript.to_vec());
        self.reply
            .clone()
            .ok_or_else(|| AiError::RequestFailed("HTTP 503 Service Unavailable".to_string()))
    }
}

pub fn data_config() -> DataConfig {
    DataConfig::rooted_at(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
}

pub async fn store() -> Arc<KnowledgeStore> {
    Arc::new(KnowledgeStore::load_all(&data_config()).await)
}

pub async fn engine_with(answerer: Arc<ScriptedAnswerer>) -> DialogueEngine {
    DialogueEngine::new(store().await, answerer)
}

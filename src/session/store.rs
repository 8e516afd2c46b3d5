//! Persistence of per-conversation dialogue state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use super::SessionError;
use crate::config::SessionConfig;
use crate::dialogue::{ConversationState, DialogueState, Transcript, Turn};

/// Stored form of a conversation between requests.
///
/// The system instruction is not stored; it is re-seeded on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<Turn>,
    #[serde(default)]
    pub state: ConversationState,
    pub updated_at: DateTime<Utc>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn capture(state: &DialogueState) -> Self {
        Self {
            transcript: state.transcript.exchanged().to_vec(),
            state: state.conversation.clone(),
            updated_at: Utc::now(),
        }
    }

    /// Rebuild engine state, re-anchoring the system instruction.
    #[must_use]
    pub fn into_dialogue_state(self) -> DialogueState {
        DialogueState {
            transcript: Transcript::restore(self.transcript),
            conversation: self.state,
        }
    }

    /// Whether the snapshot has been idle for longer than `ttl` at `now`.
    #[must_use]
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        (now - self.updated_at)
            .to_std()
            .is_ok_and(|idle| idle > ttl)
    }
}

/// Keyed storage for session snapshots.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Snapshot for `id`, or `None` for an unknown session.
    async fn load(&self, id: &str) -> Result<Option<SessionSnapshot>, SessionError>;

    async fn save(&self, id: &str, snapshot: &SessionSnapshot) -> Result<(), SessionError>;

    /// Forget `id`. Removing an unknown session is not an error.
    async fn remove(&self, id: &str) -> Result<(), SessionError>;
}

/// Process-local store; sessions vanish on restart.
///
/// With an idle TTL, sessions untouched for longer are invisible to `load`
/// and pruned on every `save`.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionSnapshot>>,
    idle_ttl: Option<Duration>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = Some(ttl);
        self
    }

    fn is_live(&self, snapshot: &SessionSnapshot, now: DateTime<Utc>) -> bool {
        !matches!(self.idle_ttl, Some(ttl) if snapshot.is_expired(ttl, now))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionSnapshot>, SessionError> {
        let now = Utc::now();
        Ok(self
            .sessions
            .read()
            .await
            .get(id)
            .filter(|snapshot| self.is_live(snapshot, now))
            .cloned())
    }

    async fn save(&self, id: &str, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        sessions.insert(id.to_string(), snapshot.clone());

        let before = sessions.len();
        sessions.retain(|_, snapshot| self.is_live(snapshot, now));
        if sessions.len() < before {
            tracing::debug!(pruned = before - sessions.len(), "Pruned idle sessions");
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), SessionError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }
}

/// One JSON file per session under a directory.
///
/// With an idle TTL, an expired session file is deleted when next loaded.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
    idle_ttl: Option<Duration>,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            idle_ttl: None,
        }
    }

    #[must_use]
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = Some(ttl);
        self
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for `id`. Only non-empty ids made of `[A-Za-z0-9_-]` are
    /// accepted, so distinct ids never share a file.
    fn path_for(&self, id: &str) -> Result<PathBuf, SessionError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SessionError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, id: &str) -> Result<Option<SessionSnapshot>, SessionError> {
        let path = self.path_for(id)?;
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<SessionSnapshot>(&content) {
            Ok(snapshot) => {
                if let Some(ttl) = self.idle_ttl {
                    if snapshot.is_expired(ttl, Utc::now()) {
                        tracing::debug!(path = %path.display(), "Session expired");
                        self.remove(id).await?;
                        return Ok(None);
                    }
                }
                Ok(Some(snapshot))
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt session file, starting fresh");
                Ok(None)
            }
        }
    }

    /// Write atomically (temp file + sync + rename).
    async fn save(&self, id: &str, snapshot: &SessionSnapshot) -> Result<(), SessionError> {
        let path = self.path_for(id)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let json = serde_json::to_string_pretty(snapshot)?;
        let temp_path = path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_data().await?;
        drop(file);

        tokio::fs::rename(&temp_path, &path).await?;
        tracing::debug!(path = %path.display(), turns = snapshot.transcript.len(), "Saved session");
        Ok(())
    }

    async fn remove(&self, id: &str) -> Result<(), SessionError> {
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// File store when a directory is configured, memory store otherwise.
#[must_use]
pub fn store_from_config(config: &SessionConfig) -> Arc<dyn SessionStore> {
    let ttl = config.idle_ttl();
    match &config.dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "Persisting sessions to disk");
            let store = FileSessionStore::new(dir.clone());
            Arc::new(match ttl {
                Some(ttl) => store.with_idle_ttl(ttl),
                None => store,
            })
        }
        None => {
            let store = MemorySessionStore::new();
            Arc::new(match ttl {
                Some(ttl) => store.with_idle_ttl(ttl),
                None => store,
            })
        }
    }
}

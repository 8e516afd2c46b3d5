//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the generative fallback client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Model used for `generateContent` calls.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Base URL for the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable name for the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Overall request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Send training examples as few-shot turns.
    #[serde(default = "default_few_shot")]
    pub few_shot: bool,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_few_shot() -> bool {
    true
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            few_shot: default_few_shot(),
        }
    }
}

/// Where the knowledge files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root data directory.
    pub dir: PathBuf,
    /// Directory (relative to `dir`) holding one JSON file per career.
    pub careers_dir: String,
    /// FAQ file name.
    pub faqs_file: String,
    /// Institutional facts file name.
    pub institution_file: String,
    /// Optional prompt/completion examples.
    pub training_file: String,
}

impl DataConfig {
    /// Data config rooted at a specific directory, default file names.
    #[must_use]
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn careers_path(&self) -> PathBuf {
        self.dir.join(&self.careers_dir)
    }

    #[must_use]
    pub fn faqs_path(&self) -> PathBuf {
        self.dir.join(&self.faqs_file)
    }

    #[must_use]
    pub fn institution_path(&self) -> PathBuf {
        self.dir.join(&self.institution_file)
    }

    #[must_use]
    pub fn training_path(&self) -> PathBuf {
        self.dir.join(&self.training_file)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            careers_dir: "carreras".to_string(),
            faqs_file: "faqs.json".to_string(),
            institution_file: "unefa_info.json".to_string(),
            training_file: "training_data.json".to_string(),
        }
    }
}

/// Limits applied to inbound utterances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum accepted utterance length, in characters.
    pub max_message_len: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_len: 1000,
        }
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable permissive CORS.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_permissive: true,
        }
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for per-session JSON files. Sessions live in memory when unset.
    pub dir: Option<PathBuf>,
    /// Seconds a session may stay idle before it is discarded. 0 keeps
    /// sessions forever.
    pub idle_ttl_secs: u64,
}

impl SessionConfig {
    #[must_use]
    pub fn idle_ttl(&self) -> Option<Duration> {
        (self.idle_ttl_secs > 0).then(|| Duration::from_secs(self.idle_ttl_secs))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: None,
            idle_ttl_secs: 3600,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ai: AiConfig,
    pub data: DataConfig,
    pub chat: ChatConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(
            config.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.few_shot);
    }

    #[test]
    fn test_ai_config_partial_deserialize() {
        let toml = r#"
            model = "gemini-1.5-flash"
            max_tokens = 512
        "#;
        let config: AiConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn test_data_config_paths() {
        let data = DataConfig::rooted_at("/srv/ingechat");
        assert_eq!(data.careers_path(), PathBuf::from("/srv/ingechat/carreras"));
        assert_eq!(data.faqs_path(), PathBuf::from("/srv/ingechat/faqs.json"));
        assert_eq!(
            data.institution_path(),
            PathBuf::from("/srv/ingechat/unefa_info.json")
        );
    }

    #[test]
    fn test_chat_config_default_limit() {
        assert_eq!(ChatConfig::default().max_message_len, 1000);
    }

    #[test]
    fn test_app_config_sections() {
        let toml = r#"
            [server]
            port = 9000

            [session]
            dir = "/tmp/ingechat-sessions"

            [chat]
            max_message_len = 200
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.session.dir,
            Some(PathBuf::from("/tmp/ingechat-sessions"))
        );
        assert_eq!(config.chat.max_message_len, 200);
        assert_eq!(config.data.faqs_file, "faqs.json");
        assert_eq!(config.session.idle_ttl(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn test_session_idle_ttl_zero_disables_expiry() {
        let config: SessionConfig = toml::from_str("idle_ttl_secs = 0").unwrap();
        assert!(config.idle_ttl().is_none());
        assert!(config.dir.is_none());
    }
}

use serde::Deserialize;

use crate::domain::{DomainError, RecencyConfig, RouterConfig, SemanticCacheConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub web_search: WebSearchConfig,
    #[serde(default)]
    pub cache: SemanticCacheConfig,
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub recency: RecencyConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

/// Where documents and cache entries live
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_documents_table")]
    pub documents_table: String,
    #[serde(default = "default_cache_table")]
    pub cache_table: String,
    /// Create the pgvector schema on startup
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    OpenAi,
    #[default]
    Nomic,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProviderKind,
    /// Provider default when unset
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_embedding_dimensions")]
    pub dimensions: usize,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSearchConfig {
    #[serde(default = "default_web_search_url")]
    pub base_url: String,
    /// Results per query, capped at 20 by the API
    #[serde(default = "default_result_count")]
    pub result_count: u32,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Credentials read from the environment, never from config files
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub database_url: Option<String>,
    pub openai_api_key: Option<String>,
    pub nomic_api_key: Option<String>,
    pub brave_api_key: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    30
}

fn default_documents_table() -> String {
    "documents".to_string()
}

fn default_cache_table() -> String {
    "cache_entries".to_string()
}

fn default_embedding_dimensions() -> usize {
    768
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_llm_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_web_search_url() -> String {
    "https://api.search.brave.com/res/v1/web/search".to_string()
}

fn default_result_count() -> u32 {
    5
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            path: default_metrics_path(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            documents_table: default_documents_table(),
            cache_table: default_cache_table(),
            auto_migrate: default_true(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: None,
            dimensions: default_embedding_dimensions(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_llm_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: None,
            timeout_secs: default_llm_timeout_secs(),
        }
    }
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_web_search_url(),
            result_count: default_result_count(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Secrets {
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            database_url: read("DATABASE_URL"),
            openai_api_key: read("OPENAI_API_KEY"),
            nomic_api_key: read("NOMIC_API_KEY"),
            brave_api_key: read("BRAVE_API_KEY"),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), DomainError> {
        self.cache.validate()?;
        self.router.validate()?;

        if self.embedding.dimensions == 0 {
            return Err(DomainError::configuration(
                "embedding.dimensions must be at least 1",
            ));
        }

        if !(1..=20).contains(&self.web_search.result_count) {
            return Err(DomainError::configuration(format!(
                "web_search.result_count must be between 1 and 20, got {}",
                self.web_search.result_count
            )));
        }

        if self.storage.min_connections > self.storage.max_connections {
            return Err(DomainError::configuration(
                "storage.min_connections cannot exceed storage.max_connections",
            ));
        }

        Ok(())
    }
}

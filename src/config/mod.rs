//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, EmbeddingConfig, EmbeddingProviderKind, LlmConfig, LogFormat, LoggingConfig,
    MetricsConfig, Secrets, ServerConfig, StorageBackend, StorageConfig, WebSearchConfig,
};

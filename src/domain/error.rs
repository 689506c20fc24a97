use thiserror::Error;

/// Core domain errors
///
/// Upstream failures carry the stage that produced them so callers can decide
/// on fallback and user messaging without string matching.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Embedding error: {provider} - {message}")]
    Embedding { provider: String, message: String },

    #[error("Store error: {message}")]
    Store { message: String },

    #[error("Search error: {provider} - {message}")]
    Search { provider: String, message: String },

    #[error("Generation error: {provider} - {message}")]
    Generation { provider: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn embedding(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Embedding {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn search(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Search {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn generation(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generation {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Name of the pipeline stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Embedding { .. } => "embedding",
            Self::Store { .. } => "store",
            Self::Search { .. } => "web_search",
            Self::Generation { .. } => "generation",
            Self::Validation { .. } => "validation",
            Self::Configuration { .. } => "configuration",
            Self::Internal { .. } => "internal",
        }
    }

    /// Whether the failure came from an external collaborator
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Embedding { .. } | Self::Search { .. } | Self::Generation { .. }
        )
    }
}

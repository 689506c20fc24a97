//! Web search implementations

mod brave;

use std::sync::Arc;
use std::time::Duration;

pub use brave::BraveWebSearcher;

use crate::config::{Secrets, WebSearchConfig};
use crate::domain::{DomainError, WebSearcher};
use crate::infrastructure::http_client::HttpClient;

/// Build the configured web searcher
pub fn create_web_searcher(
    config: &WebSearchConfig,
    secrets: &Secrets,
) -> Result<Arc<dyn WebSearcher>, DomainError> {
    let api_key = secrets
        .brave_api_key
        .as_deref()
        .ok_or_else(|| DomainError::configuration("BRAVE_API_KEY is required for web search"))?;

    let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))
        .map_err(|e| DomainError::configuration(e.to_string()))?;

    Ok(Arc::new(
        BraveWebSearcher::new(http_client, api_key)
            .with_base_url(&config.base_url)
            .with_result_count(config.result_count)
            .with_language(&config.language),
    ))
}

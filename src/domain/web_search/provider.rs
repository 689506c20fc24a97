//! Web searcher trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::SearchSnippet;
use crate::domain::DomainError;

/// External web search. Failures surface as `DomainError::Search`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Ordered result snippets for a query
    async fn search(&self, query: &str) -> Result<Vec<SearchSnippet>, DomainError>;

    fn provider_name(&self) -> &'static str;
}

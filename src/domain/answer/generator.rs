//! Answer generator trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::AnswerContext;
use crate::domain::DomainError;

/// Produces an answer to a query from retrieved evidence.
/// Failures surface as `DomainError::Generation`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, context: &AnswerContext, query: &str) -> Result<String, DomainError>;
}

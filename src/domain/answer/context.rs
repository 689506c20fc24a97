//! Context assembled for answer generation

use crate::domain::document::ScoredDocument;

/// Answer returned when neither documents nor web results are available
pub const NO_CONTEXT_ANSWER: &str = "I couldn't find relevant information to answer your question.";

/// Evidence the LLM answers from
#[derive(Debug, Clone, Default)]
pub struct AnswerContext {
    pub documents: Vec<ScoredDocument>,
    /// Formatted web search results
    pub web_results: Option<String>,
}

impl AnswerContext {
    pub fn from_documents(documents: Vec<ScoredDocument>) -> Self {
        Self {
            documents,
            web_results: None,
        }
    }

    pub fn from_web_results(web_results: impl Into<String>) -> Self {
        Self {
            documents: Vec::new(),
            web_results: Some(web_results.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
            && self
                .web_results
                .as_deref()
                .is_none_or(|w| w.trim().is_empty())
    }

    /// Render as `Document (<title>): <content>` blocks followed by the web
    /// results, separated by blank lines
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = self
            .documents
            .iter()
            .map(|scored| {
                format!(
                    "Document ({}): {}",
                    scored.document.title(),
                    scored.document.content
                )
            })
            .collect();

        if let Some(web) = self.web_results.as_deref().filter(|w| !w.trim().is_empty()) {
            parts.push(format!("Web Information: {}", web));
        }

        parts.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::Document;
    use serde_json::json;

    #[test]
    fn test_render_documents_and_web() {
        let context = AnswerContext {
            documents: vec![
                ScoredDocument::new(
                    Document::new("a", "Revenue was $383B", vec![])
                        .with_metadata("company", json!("Apple Inc.")),
                    0.91,
                ),
                ScoredDocument::new(Document::new("b", "No metadata here", vec![]), 0.8),
            ],
            web_results: Some("Web Search Results:\n\nTitle: x".to_string()),
        };

        assert_eq!(
            context.render(),
            "Document (Apple Inc.): Revenue was $383B\n\nDocument (Unknown): No metadata here\n\nWeb Information: Web Search Results:\n\nTitle: x"
        );
        assert!(!context.is_empty());
    }

    #[test]
    fn test_empty_context() {
        assert!(AnswerContext::default().is_empty());
        assert!(AnswerContext::from_web_results("   ").is_empty());
        assert_eq!(AnswerContext::from_web_results("").render(), "");
    }
}

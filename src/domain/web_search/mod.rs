//! Web search domain models and the searcher contract

mod provider;
mod snippet;

pub use provider::WebSearcher;
pub use snippet::{clean_text, format_results, SearchSnippet};

#[cfg(test)]
pub use provider::MockWebSearcher;

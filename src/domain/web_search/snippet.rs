//! Search result snippets and their text form

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACED_MAGNITUDE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+(b|m|t\s+r)\s+i\s+l\s+l\s+i\s+o\s+n").unwrap());
static SPACED_PERCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*\.\s*(\d+)\s*%").unwrap());
static MISSING_SPACE_AFTER_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zA-Z])\.([a-zA-Z])").unwrap());

/// One web search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    pub url: String,
    pub description: String,
}

impl SearchSnippet {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
        }
    }
}

/// Repair formatting damage common in scraped descriptions
pub fn clean_text(text: &str) -> String {
    let text = WHITESPACE.replace_all(text, " ");
    let text = SPACED_MAGNITUDE.replace_all(&text, |caps: &Captures| {
        let magnitude = match &caps[2][..1] {
            "b" => "billion",
            "m" => "million",
            _ => "trillion",
        };
        format!("{} {}", &caps[1], magnitude)
    });
    let text = SPACED_PERCENT.replace_all(&text, "$1.$2%");
    let text = MISSING_SPACE_AFTER_PERIOD.replace_all(&text, "$1. $2");
    text.trim().to_string()
}

/// Render snippets as the text block handed to the LLM
pub fn format_results(query: &str, snippets: &[SearchSnippet]) -> String {
    if snippets.is_empty() {
        return format!(
            "Web Search Results:\nNo results found for query: '{}'",
            query
        );
    }

    let blocks: Vec<String> = snippets
        .iter()
        .map(|s| {
            format!(
                "Title: {}\nURL: {}\nDescription: {}",
                s.title,
                s.url,
                clean_text(&s.description)
            )
        })
        .collect();

    format!("Web Search Results:\n\n{}", blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_text("  revenue \n\n grew\tfast "), "revenue grew fast");
    }

    #[test]
    fn test_clean_rejoins_spelled_out_magnitudes() {
        assert_eq!(
            clean_text("revenue of 350 b i l l i o n dollars"),
            "revenue of 350 billion dollars"
        );
        assert_eq!(clean_text("2 t r i l l i o n"), "2 trillion");
        assert_eq!(clean_text("3 m i l l i o n"), "3 million");
    }

    #[test]
    fn test_clean_fixes_percentages() {
        assert_eq!(clean_text("up 12 . 5 % year over year"), "up 12.5% year over year");
    }

    #[test]
    fn test_clean_adds_space_after_period() {
        assert_eq!(clean_text("Strong quarter.Revenue grew"), "Strong quarter. Revenue grew");
    }

    #[test]
    fn test_format_results() {
        let snippets = vec![
            SearchSnippet::new("NVIDIA Q3", "https://a.example", "Record  revenue"),
            SearchSnippet::new("NVIDIA Q4", "https://b.example", "Data center"),
        ];

        let text = format_results("nvidia", &snippets);

        assert_eq!(
            text,
            "Web Search Results:\n\nTitle: NVIDIA Q3\nURL: https://a.example\nDescription: Record revenue\n\nTitle: NVIDIA Q4\nURL: https://b.example\nDescription: Data center"
        );
    }

    #[test]
    fn test_format_empty_results() {
        assert_eq!(
            format_results("nvidia", &[]),
            "Web Search Results:\nNo results found for query: 'nvidia'"
        );
    }
}

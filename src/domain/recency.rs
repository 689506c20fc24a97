//! Time-sensitivity classification of query text
//!
//! Pure functions over text: which calendar years a query names and which
//! relative temporal terms ("latest", "today", ...) it uses. Both the cache
//! invalidation rules and the router's recency check are built on this.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Four-digit years from 1900 to 2099 as whole words
static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(19\d\d|20\d\d)\b").unwrap());

/// Relative terms used when none are configured
pub const DEFAULT_RELATIVE_TERMS: &[&str] = &[
    "latest",
    "recent",
    "recently",
    "current",
    "currently",
    "today",
    "tonight",
    "now",
    "news",
    "breaking",
    "yesterday",
    "this week",
    "this month",
    "this quarter",
    "this year",
];

fn default_relative_terms() -> Vec<String> {
    DEFAULT_RELATIVE_TERMS.iter().map(|t| t.to_string()).collect()
}

/// Configurable keyword list behind the relative-term check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecencyConfig {
    #[serde(default = "default_relative_terms")]
    pub relative_terms: Vec<String>,
}

impl Default for RecencyConfig {
    fn default() -> Self {
        Self {
            relative_terms: default_relative_terms(),
        }
    }
}

/// Time-sensitive tokens found in one text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecencyClassification {
    pub sensitive_years: BTreeSet<i32>,
    pub relative_terms: BTreeSet<String>,
}

impl RecencyClassification {
    pub fn sensitive_relative(&self) -> bool {
        !self.relative_terms.is_empty()
    }

    /// Most recent year mentioned, if any
    pub fn latest_year(&self) -> Option<i32> {
        self.sensitive_years.iter().next_back().copied()
    }

    pub fn is_time_sensitive(&self) -> bool {
        self.sensitive_relative() || !self.sensitive_years.is_empty()
    }

    /// Sensitive relative to a boundary: any relative term, or a year at or
    /// after `boundary_year`.
    pub fn is_recent(&self, boundary_year: i32) -> bool {
        self.sensitive_relative()
            || self
                .latest_year()
                .is_some_and(|year| year >= boundary_year)
    }
}

/// Compiled relative-term matcher
#[derive(Debug, Clone)]
pub struct RecencyPolicy {
    terms: Vec<String>,
    pattern: Option<Regex>,
}

impl RecencyPolicy {
    pub fn new(terms: &[String]) -> Result<Self, DomainError> {
        let mut terms: Vec<String> = terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        terms.sort();
        terms.dedup();

        if terms.is_empty() {
            return Ok(Self {
                terms,
                pattern: None,
            });
        }

        // Longest first so "this year" wins over a shorter overlapping term
        let mut alternatives: Vec<&String> = terms.iter().collect();
        alternatives.sort_by_key(|t| std::cmp::Reverse(t.len()));
        let alternation = alternatives
            .iter()
            .map(|t| regex::escape(t).replace(' ', r"\s+"))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(r"\b(?:{})\b", alternation)).map_err(|e| {
            DomainError::configuration(format!("Invalid relative term list: {}", e))
        })?;

        Ok(Self {
            terms,
            pattern: Some(pattern),
        })
    }

    pub fn from_config(config: &RecencyConfig) -> Result<Self, DomainError> {
        Self::new(&config.relative_terms)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn classify(&self, text: &str) -> RecencyClassification {
        let lowered = text.to_lowercase();

        let sensitive_years = YEAR_PATTERN
            .find_iter(&lowered)
            .filter_map(|m| m.as_str().parse::<i32>().ok())
            .collect();

        let relative_terms = match &self.pattern {
            Some(pattern) => pattern
                .find_iter(&lowered)
                .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
                .collect(),
            None => BTreeSet::new(),
        };

        RecencyClassification {
            sensitive_years,
            relative_terms,
        }
    }
}

impl Default for RecencyPolicy {
    fn default() -> Self {
        let terms = default_relative_terms();
        // The built-in list is plain words, compilation cannot fail
        Self::new(&terms).unwrap_or(Self {
            terms,
            pattern: None,
        })
    }
}

/// Classify with the built-in relative term list
pub fn classify_recency(text: &str) -> RecencyClassification {
    static DEFAULT_POLICY: Lazy<RecencyPolicy> = Lazy::new(RecencyPolicy::default);
    DEFAULT_POLICY.classify(text)
}

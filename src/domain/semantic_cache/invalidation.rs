//! Time-sensitive invalidation of cache candidates
//!
//! A candidate that is similar enough can still answer a different question
//! when the two queries are anchored to different points in time.

use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::domain::recency::RecencyPolicy;

/// Why a lookup did not produce a hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum MissReason {
    /// No entry at or above the similarity threshold
    NoMatch,
    /// The queries name different calendar years
    YearMismatch {
        query_years: BTreeSet<i32>,
        cached_years: BTreeSet<i32>,
    },
    /// The queries use different relative temporal terms
    RelativeTermMismatch {
        query_terms: BTreeSet<String>,
        cached_terms: BTreeSet<String>,
    },
    /// Both use relative terms, but the entry is older than the allowed age
    StaleRelativeEntry { age_secs: u64 },
}

impl MissReason {
    /// Rule label used in metrics and logs
    pub fn rule(&self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::YearMismatch { .. } => "year_mismatch",
            Self::RelativeTermMismatch { .. } => "relative_term_mismatch",
            Self::StaleRelativeEntry { .. } => "stale_relative_entry",
        }
    }

    /// Whether the cached entry should be removed
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleRelativeEntry { .. })
    }

    pub fn is_invalidation(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch => write!(f, "no cached query above the similarity threshold"),
            Self::YearMismatch {
                query_years,
                cached_years,
            } => write!(
                f,
                "year mismatch: query {:?}, cached {:?}",
                query_years, cached_years
            ),
            Self::RelativeTermMismatch {
                query_terms,
                cached_terms,
            } => write!(
                f,
                "relative term mismatch: query {:?}, cached {:?}",
                query_terms, cached_terms
            ),
            Self::StaleRelativeEntry { age_secs } => {
                write!(f, "time-relative entry is stale ({}s old)", age_secs)
            }
        }
    }
}

/// Check a similar-enough candidate against the time-sensitivity rules.
///
/// Returns `None` when the candidate may be served.
pub fn check_invalidation(
    policy: &RecencyPolicy,
    query: &str,
    cached_query: &str,
    entry_age: Duration,
    relative_term_max_age: Duration,
) -> Option<MissReason> {
    let current = policy.classify(query);
    let cached = policy.classify(cached_query);

    if current.sensitive_years != cached.sensitive_years {
        return Some(MissReason::YearMismatch {
            query_years: current.sensitive_years,
            cached_years: cached.sensitive_years,
        });
    }

    if current.relative_terms != cached.relative_terms {
        return Some(MissReason::RelativeTermMismatch {
            query_terms: current.relative_terms,
            cached_terms: cached.relative_terms,
        });
    }

    if current.sensitive_relative() && entry_age > relative_term_max_age {
        return Some(MissReason::StaleRelativeEntry {
            age_secs: entry_age.as_secs(),
        });
    }

    None
}

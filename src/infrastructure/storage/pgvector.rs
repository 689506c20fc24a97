//! pgvector text encoding and identifier checks

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Table names are interpolated into SQL, so only plain identifiers pass
static TABLE_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").unwrap());

pub fn validate_table_name(name: &str) -> Result<(), DomainError> {
    if TABLE_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(DomainError::configuration(format!(
            "Invalid table name '{}': use lowercase letters, digits and underscores",
            name
        )))
    }
}

/// `[a,b,c]` literal accepted by `::vector`
pub fn to_pgvector(embedding: &[f32]) -> String {
    let values: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(","))
}

/// Parse the text form of a vector column
pub fn parse_pgvector(s: &str) -> Result<Vec<f32>, DomainError> {
    let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
    if trimmed.trim().is_empty() {
        return Ok(Vec::new());
    }

    trimmed
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<Vec<f32>, _>>()
        .map_err(|e| DomainError::store(format!("Failed to parse vector: {}", e)))
}

//! Query, document and cache payloads

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CacheStats, Document};
use crate::infrastructure::services::{CacheReport, SOURCE_PREVIEW_CHARS};

#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadDocumentRequest {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDocumentResponse {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for UploadDocumentResponse {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id.clone(),
            title: document.title().to_string(),
            created_at: document.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDocumentsParams {
    pub limit: Option<usize>,
}

/// A stored document with its content truncated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub metadata: HashMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentSummary {
    fn from(document: Document) -> Self {
        Self {
            title: document.title().to_string(),
            preview: document.preview(SOURCE_PREVIEW_CHARS),
            id: document.id,
            metadata: document.metadata,
            created_at: document.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub object: String,
    pub data: Vec<DocumentSummary>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStatsResponse {
    pub total_entries: u64,
    pub total_hits: u64,
    pub session_hits: u64,
    pub session_misses: u64,
    pub hit_rate: f64,
}

impl From<CacheReport> for CacheStatsResponse {
    fn from(report: CacheReport) -> Self {
        Self {
            total_entries: report.total_entries,
            total_hits: report.total_hits,
            session_hits: report.session_hits,
            session_misses: report.session_misses,
            hit_rate: report.hit_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearCacheResponse {
    pub cleared: bool,
    /// Stats read back after the clear
    pub total_entries: u64,
    pub total_hits: u64,
}

impl From<CacheStats> for ClearCacheResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            cleared: true,
            total_entries: stats.total_entries,
            total_hits: stats.total_hits,
        }
    }
}

//! HTTP request/response types

pub mod error;
pub mod json;
pub mod query;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use query::{
    CacheStatsResponse, ClearCacheResponse, DocumentListResponse, DocumentSummary,
    ListDocumentsParams, QueryRequest, UploadDocumentRequest, UploadDocumentResponse,
};

//! Document upload and listing

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{
    ApiError, DocumentListResponse, DocumentSummary, Json, ListDocumentsParams,
    UploadDocumentRequest, UploadDocumentResponse,
};

/// POST /v1/documents
pub async fn upload_document(
    State(state): State<AppState>,
    Json(request): Json<UploadDocumentRequest>,
) -> Result<(StatusCode, Json<UploadDocumentResponse>), ApiError> {
    let document = state
        .documents
        .upload_text(&request.content, request.metadata)
        .await?;

    debug!(document_id = %document.id, "Upload handled");

    Ok((
        StatusCode::CREATED,
        Json(UploadDocumentResponse::from(&document)),
    ))
}

/// GET /v1/documents
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListDocumentsParams>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let (documents, total) = tokio::try_join!(
        state.documents.list(params.limit),
        state.documents.count()
    )?;

    Ok(Json(DocumentListResponse {
        object: "list".to_string(),
        data: documents.into_iter().map(DocumentSummary::from).collect(),
        total,
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::Request,
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::api::state::test_support;
    use crate::api::v1::create_v1_router;

    fn app(state: AppState) -> Router {
        Router::new().nest("/v1", create_v1_router()).with_state(state)
    }

    fn upload(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/v1/documents")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upload_then_list() {
        let state = test_support::state();

        let response = app(state.clone())
            .oneshot(upload(
                r#"{"content":"Apple reported revenue of $394B","metadata":{"title":"Apple 10-K"}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["title"], "Apple 10-K");
        assert!(created["id"].as_str().unwrap().starts_with("doc_"));

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/v1/documents?limit=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = json_body(response).await;
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["data"][0]["id"], created["id"]);
        assert_eq!(listed["data"][0]["preview"], "Apple reported revenue of $394B");
    }

    #[tokio::test]
    async fn test_upload_empty_content_rejected() {
        let response = app(test_support::state())
            .oneshot(upload(r#"{"content":""}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

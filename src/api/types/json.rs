//! JSON extractor whose rejections use the API error body

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};

use super::error::ApiError;

/// `axum::Json` with rejections reported as [`ApiError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        axum::Json::<T>::from_request(req, state)
            .await
            .map(|axum::Json(value)| Json(value))
            .map_err(rejection_to_error)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    let message = match &rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid request body: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("Malformed JSON: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected 'Content-Type: application/json'".to_string()
        }
        other => other.body_text(),
    };

    let mut err = ApiError::bad_request(message).with_code("invalid_json");
    err.status = rejection.status();
    err
}

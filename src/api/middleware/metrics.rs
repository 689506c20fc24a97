//! Per-request HTTP metrics

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

use crate::infrastructure::observability::record_http_request;

/// Record method, route template, status and latency for every request
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().as_str().to_owned();
    let path = route_label(&request);

    let response = next.run(request).await;

    record_http_request(&method, &path, response.status().as_u16(), start.elapsed());

    response
}

/// Matched route template, so `/v1/documents?limit=5` and `/v1/documents` share a label
fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_requests_share_label() {
        let request = Request::builder()
            .uri("/does/not/exist/123")
            .body(Body::empty())
            .unwrap();

        assert_eq!(route_label(&request), "unmatched");
    }
}

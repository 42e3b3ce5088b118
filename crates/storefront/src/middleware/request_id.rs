//! Request ID middleware.
//!
//! Reuses an upstream `x-request-id` when one is present, otherwise assigns a
//! UUID v4. The ID is recorded on the request span, tagged on the Sentry scope
//! and echoed back in the response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn incoming_or_new(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| !id.is_empty())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Middleware that ensures every request carries a request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_or_new(&request);

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn test_upstream_id_is_kept() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "edge-123")
            .body(Body::empty())
            .unwrap();
        assert_eq!(incoming_or_new(&request), "edge-123");
    }

    #[test]
    fn test_missing_id_is_generated() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let id = incoming_or_new(&request);
        assert_eq!(Uuid::parse_str(&id).unwrap().get_version_num(), 4);
    }
}

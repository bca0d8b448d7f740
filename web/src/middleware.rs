//! Axum middleware for request tracking.
//!
//! The correlation layer:
//! 1. Reads the correlation ID from `X-Correlation-ID` (or generates a UUID)
//! 2. Stores it in request extensions for the [`CorrelationId`](crate::CorrelationId) extractor
//! 3. Runs the request inside a tracing span carrying `correlation_id`
//! 4. Echoes the ID in the response `X-Correlation-ID` header
//!
//! # Example
//!
//! ```
//! use axum::{Router, routing::get};
//! use community_connect_web::middleware::correlation_id_layer;
//!
//! let app: Router = Router::new()
//!     .route("/api/events", get(|| async { "[]" }))
//!     .layer(correlation_id_layer());
//! ```

use axum::{extract::Request, http::HeaderValue, response::Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for correlation ID.
/// Lowercase, as `HeaderMap::insert` requires for static names.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Create a layer that adds correlation ID tracking to all requests.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Layer for correlation ID tracking.
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Middleware service for correlation ID tracking.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        req.extensions_mut().insert(correlation_id);

        let span = tracing::info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            path = %req.uri().path(),
        );

        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.instrument(span).await?;

            if let Ok(header_value) = HeaderValue::from_str(&correlation_id.to_string()) {
                response
                    .headers_mut()
                    .insert(CORRELATION_ID_HEADER, header_value);
            }

            Ok(response)
        })
    }
}

/// Look up the correlation ID stored by [`correlation_id_layer`].
///
/// Returns `None` if the layer is not installed.
pub trait CorrelationIdExt {
    /// Correlation ID of this request, if any.
    fn correlation_id(&self) -> Option<Uuid>;
}

impl CorrelationIdExt for Request {
    fn correlation_id(&self) -> Option<Uuid> {
        self.extensions().get::<Uuid>().copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/api/events", get(|| async { "[]" }))
            .route(
                "/echo",
                get(|req: Request<Body>| async move {
                    req.correlation_id()
                        .map(|id| id.to_string())
                        .unwrap_or_default()
                }),
            )
            .layer(correlation_id_layer())
    }

    fn header_of(response: &Response) -> String {
        response
            .headers()
            .get(CORRELATION_ID_HEADER)
            .expect("Correlation ID header should be present")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_correlation_id_generated_if_missing() {
        let request = Request::builder()
            .uri("/api/events")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert!(Uuid::parse_str(&header_of(&response)).is_ok());
    }

    #[tokio::test]
    async fn test_correlation_id_preserved_from_request() {
        let request_uuid = Uuid::new_v4();
        let request = Request::builder()
            .uri("/api/events")
            .header(CORRELATION_ID_HEADER, request_uuid.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(header_of(&response), request_uuid.to_string());
    }

    #[tokio::test]
    async fn test_handler_sees_same_id_as_response() {
        let request = Request::builder().uri("/echo").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        let header = header_of(&response);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(body.to_vec()).unwrap(), header);
    }

    #[tokio::test]
    async fn test_invalid_uuid_generates_new() {
        let request = Request::builder()
            .uri("/api/events")
            .header(CORRELATION_ID_HEADER, "not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let header = header_of(&response);

        assert!(Uuid::parse_str(&header).is_ok());
        assert_ne!(header, "not-a-uuid");
    }

    #[tokio::test]
    async fn test_unmatched_routes_still_get_an_id() {
        let request = Request::builder()
            .uri("/nowhere")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), 404);
        assert!(Uuid::parse_str(&header_of(&response)).is_ok());
    }
}

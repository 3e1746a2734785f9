//! Response handling and transformation.
//!
//! # Responsibilities
//! - Turn a [`ForwardResult`] into the caller's response
//! - Map boundary and transport failures to HTTP status codes
//!
//! # Design Decisions
//! - The body is written as text, so the response carries `text/plain`
//! - A result header the host rejects is logged and dropped
//! - Transport failures become 502 Bad Gateway

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::forward::{ForwardError, ForwardResult, TransportError};
use crate::observability::metrics;
use crate::security::headers::apply_expose_headers;

/// Failures the boundary turns into error responses.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Missing x-forward-url header.")]
    MissingForwardUrl,

    #[error("Upstream request failed")]
    Upstream(#[source] TransportError),
}

impl HandlerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::MissingForwardUrl => StatusCode::BAD_REQUEST,
            HandlerError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<ForwardError> for HandlerError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::MissingForwardUrl => HandlerError::MissingForwardUrl,
            ForwardError::Transport(e) => HandlerError::Upstream(e),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Write a forward result back to the caller.
pub fn relay_response(result: ForwardResult) -> Response {
    let (status_code, body, headers) = result.into_parts();

    let status = StatusCode::from_u16(status_code).unwrap_or_else(|_| {
        tracing::warn!(status = status_code, "Downstream status not representable");
        StatusCode::BAD_GATEWAY
    });

    let mut response = (status, body).into_response();
    let response_headers = response.headers_mut();

    for (name, value) in headers {
        let parsed = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| e.to_string())
            .and_then(|n| {
                HeaderValue::from_bytes(value.as_bytes())
                    .map(|v| (n, v))
                    .map_err(|e| e.to_string())
            });
        match parsed {
            Ok((n, v)) => {
                response_headers.insert(n, v);
            }
            Err(e) => {
                tracing::warn!(header = %name, error = %e, "Failed to set response header");
                metrics::record_header_drop("response");
            }
        }
    }

    apply_expose_headers(response_headers);

    tracing::debug!(
        status = %status,
        headers = response_headers.len(),
        "Response headers forwarded"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::FlatHeaders;
    use axum::http::header;

    fn result(status: u16, headers: &[(&str, &str)]) -> ForwardResult {
        let headers: FlatHeaders = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ForwardResult::new(status, "payload".into(), headers)
    }

    #[test]
    fn status_and_headers_are_relayed() {
        let response = relay_response(result(404, &[("ETag", "\"v1\""), ("X-Cache", "MISS")]));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["etag"], "\"v1\"");
        assert_eq!(response.headers()["x-cache"], "MISS");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn invalid_headers_are_dropped() {
        let response = relay_response(result(200, &[("bad name", "x"), ("x-ok", "y")]));
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-ok").is_some());
        assert_eq!(response.headers().len(), 3);
    }

    #[test]
    fn expose_headers_are_merged() {
        let response = relay_response(result(
            200,
            &[("Access-Control-Expose-Headers", "X-Custom, etag")],
        ));
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_EXPOSE_HEADERS],
            "ETag, Server, Location, x-Amz-Cf-Id, X-Amz-Cd-Pop, X-Cache, X-Custom"
        );
    }

    #[test]
    fn errors_map_to_statuses() {
        assert_eq!(
            HandlerError::MissingForwardUrl.status_code(),
            StatusCode::BAD_REQUEST
        );
        let upstream = HandlerError::from(ForwardError::Transport(TransportError::Other(
            "refused".into(),
        )));
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.to_string(), "Upstream request failed");
    }
}

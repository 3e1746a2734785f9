//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) before the handler runs
//! - Turn the host's request parts into an [`InboundRequest`]
//! - Parse cookies out of `Cookie` headers
//!
//! # Design Decisions
//! - Request ID is an ordinary header, so it travels downstream with the rest
//! - Only a declared `Content-Length` marks a body as present

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId, SetRequestIdLayer};
use uuid::Uuid;

use crate::forward::{CookieJar, HeaderBag, InboundRequest};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Produces UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Layer that stamps `x-request-id` on requests lacking one.
pub fn request_id_layer() -> SetRequestIdLayer<UuidRequestId> {
    SetRequestIdLayer::x_request_id(UuidRequestId)
}

/// Read the request ID for logging.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Build the core's view of an inbound request from buffered parts.
pub fn inbound_request(method: &Method, headers: &HeaderMap, body: Bytes) -> InboundRequest {
    let mut bag = HeaderBag::new();
    for (name, value) in headers {
        bag.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    InboundRequest {
        method: method.as_str().to_string(),
        headers: bag,
        cookies: parse_cookies(headers),
        content_length,
        content_type,
        body,
    }
}

/// Collect `name=value` pairs from every `Cookie` header.
///
/// The first occurrence of a name wins; names compare case-insensitively.
pub fn parse_cookies(headers: &HeaderMap) -> CookieJar {
    let mut jar = CookieJar::new();
    for value in headers.get_all(header::COOKIE) {
        let value = String::from_utf8_lossy(value.as_bytes());
        for pair in value.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            jar.insert_if_absent(name, value.trim().to_string());
        }
    }
    jar
}

//! Request translation: inbound request → outbound request.
//!
//! # Order of operations
//! 1. Method, upper-cased
//! 2. Target URL, taken verbatim from the directive header
//! 3. Header copy, minus the request skip set
//! 4. Cookie folding into a single `Cookie` header
//! 5. Body attachment, only when the declared length is positive
//!
//! Header copy runs before cookie folding so an inbound `Cookie` header can
//! never suppress the folded one, and before body attachment so the computed
//! content type is the one that wins.

use reqwest::header::{HeaderName, HeaderValue};

use crate::forward::error::{ForwardError, HeaderRejection};
use crate::forward::headers::{HeaderBag, CONTENT_HEADERS, REQUEST_SKIP};
use crate::forward::model::{
    InboundRequest, OutboundContent, OutboundRequest, DEFAULT_CONTENT_TYPE,
};
use crate::observability::metrics;

const COOKIE_HEADER: &str = "Cookie";
const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Build the outbound request for `inbound`.
///
/// Individual headers that cannot be attached are logged and dropped; the
/// only hard failure is a missing destination directive.
pub fn translate(inbound: &InboundRequest) -> Result<OutboundRequest, ForwardError> {
    let url = inbound.forward_url().ok_or(ForwardError::MissingForwardUrl)?;
    let method = inbound.method.to_ascii_uppercase();

    let mut headers = HeaderBag::new();
    let mut pending_content = HeaderBag::new();

    for (name, values) in inbound.headers.iter() {
        if REQUEST_SKIP.contains(name) {
            continue;
        }
        match attach_general(&mut headers, name, values) {
            Ok(()) => {}
            Err(HeaderRejection::ContentHeader) => {
                pending_content.insert(name, values.clone());
            }
            Err(rejection) => drop_header(name, rejection),
        }
    }

    if !inbound.cookies.is_empty() {
        let folded = inbound
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        match validate(COOKIE_HEADER, std::slice::from_ref(&folded)) {
            Ok(()) => {
                headers.insert(COOKIE_HEADER, vec![folded]);
            }
            Err(rejection) => drop_header(COOKIE_HEADER, rejection),
        }
    }

    let content = match inbound.content_length {
        Some(len) if len > 0 => Some(attach_body(inbound, pending_content)),
        _ => {
            for (name, _) in pending_content.iter() {
                drop_header(name, HeaderRejection::NoContent);
            }
            None
        }
    };

    Ok(OutboundRequest {
        method,
        url,
        headers,
        content,
    })
}

/// Add a header to the general collection.
///
/// Values are only checked for bytes that cannot travel on the wire.
fn attach_general(
    headers: &mut HeaderBag,
    name: &str,
    values: &[String],
) -> Result<(), HeaderRejection> {
    validate(name, values)?;
    if CONTENT_HEADERS.contains(name) {
        return Err(HeaderRejection::ContentHeader);
    }
    for value in values {
        headers.append(name, value.as_str());
    }
    Ok(())
}

fn validate(name: &str, values: &[String]) -> Result<(), HeaderRejection> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| HeaderRejection::InvalidName)?;
    for value in values {
        HeaderValue::from_bytes(value.as_bytes()).map_err(|_| HeaderRejection::InvalidValue)?;
    }
    Ok(())
}

fn attach_body(inbound: &InboundRequest, mut content_headers: HeaderBag) -> OutboundContent {
    // Bytes are never consumed, so reading always starts at offset zero.
    let text = String::from_utf8_lossy(&inbound.body).into_owned();
    let media_type = inbound
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    content_headers.insert(
        CONTENT_TYPE_HEADER,
        vec![OutboundContent::content_type_header(&media_type)],
    );

    OutboundContent {
        text,
        media_type,
        headers: content_headers,
    }
}

fn drop_header(name: &str, rejection: HeaderRejection) {
    tracing::warn!(header = %name, reason = %rejection, "Failed to add request header");
    metrics::record_header_drop("request");
}

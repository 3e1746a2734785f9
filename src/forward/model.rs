//! Values exchanged across one forward operation.

use bytes::Bytes;

use crate::forward::headers::{CookieJar, FlatHeaders, HeaderBag};

/// Media type used for an outbound body when the caller declared none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Text encoding of every outbound body.
pub const BODY_CHARSET: &str = "utf-8";

/// The caller's request, already buffered by the host.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    pub method: String,
    pub headers: HeaderBag,
    pub cookies: CookieJar,
    /// Declared `Content-Length`, if any.
    pub content_length: Option<u64>,
    /// Declared `Content-Type`, if any.
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Self::default()
        }
    }

    /// Value of the destination directive header.
    pub fn forward_url(&self) -> Option<String> {
        self.headers
            .get_joined(crate::forward::headers::FORWARD_URL_HEADER)
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
        self.cookies.insert(name, value.to_string());
        self
    }

    /// Attach a body together with its declared length and type.
    pub fn with_body(mut self, body: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        let body = body.into();
        self.content_length = Some(body.len() as u64);
        self.content_type = content_type.map(str::to_string);
        self.body = body;
        self
    }
}

/// Request handed to the transport. Built fresh for every forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// Upper-cased method.
    pub method: String,
    /// Destination URL, unvalidated.
    pub url: String,
    pub headers: HeaderBag,
    pub content: Option<OutboundContent>,
}

/// Text body of an outbound request plus its content headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundContent {
    pub text: String,
    pub media_type: String,
    /// Content headers, `content-type` included.
    pub headers: HeaderBag,
}

impl OutboundContent {
    /// `Content-Type` value sent on the wire.
    ///
    /// A charset is appended unless the media type already names one.
    pub fn content_type_header(media_type: &str) -> String {
        let has_charset = media_type
            .split(';')
            .skip(1)
            .any(|param| param.trim().to_ascii_lowercase().starts_with("charset="));
        if has_charset {
            media_type.to_string()
        } else {
            format!("{media_type}; charset={BODY_CHARSET}")
        }
    }
}

/// Response produced by the transport.
#[derive(Debug, Clone, Default)]
pub struct OutboundResponse {
    pub status: u16,
    pub headers: HeaderBag,
    pub content_headers: HeaderBag,
    pub body: Bytes,
}

/// What the core hands back to the boundary handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardResult {
    status_code: u16,
    response_data: String,
    headers: FlatHeaders,
}

impl ForwardResult {
    pub fn new(status_code: u16, response_data: String, headers: FlatHeaders) -> Self {
        Self {
            status_code,
            response_data,
            headers,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn response_data(&self) -> &str {
        &self.response_data
    }

    pub fn headers(&self) -> &FlatHeaders {
        &self.headers
    }

    pub fn into_parts(self) -> (u16, String, FlatHeaders) {
        (self.status_code, self.response_data, self.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_gets_charset() {
        assert_eq!(
            OutboundContent::content_type_header("application/json"),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn content_type_keeps_declared_charset() {
        assert_eq!(
            OutboundContent::content_type_header("text/plain; Charset=iso-8859-1"),
            "text/plain; Charset=iso-8859-1"
        );
    }

    #[test]
    fn forward_url_is_read_case_insensitively() {
        let req = InboundRequest::new("GET").with_header("X-Forward-Url", "http://a.test/");
        assert_eq!(req.forward_url().as_deref(), Some("http://a.test/"));
    }

    #[test]
    fn with_body_declares_length() {
        let req = InboundRequest::new("POST").with_body("abc", None);
        assert_eq!(req.content_length, Some(3));
        assert!(req.content_type.is_none());
    }
}

//! Outbound HTTP transport.
//!
//! # Responsibilities
//! - Send one [`OutboundRequest`] and buffer the whole response
//! - Split response headers into general and content headers
//!
//! # Design Decisions
//! - One `reqwest::Client` per process, built at startup and shared read-only
//! - Certificate validation is disabled unless configured otherwise
//! - gzip, deflate and brotli responses are decoded transparently
//! - No retries; timeouts are the client's own

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect, Client, Method};

use crate::config::UpstreamConfig;
use crate::forward::error::TransportError;
use crate::forward::headers::{HeaderBag, CONTENT_HEADERS};
use crate::forward::model::{OutboundRequest, OutboundResponse};

/// Performs the single network round trip of a forward.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<OutboundResponse, TransportError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build the shared client from upstream settings.
    pub fn new(config: &UpstreamConfig) -> Result<Self, TransportError> {
        let redirect_policy = if config.follow_redirects {
            redirect::Policy::limited(config.max_redirects)
        } else {
            redirect::Policy::none()
        };

        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect_policy)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(
            accept_invalid_certs = config.accept_invalid_certs,
            follow_redirects = config.follow_redirects,
            "Upstream client initialized"
        );

        Ok(Self { client })
    }

    fn build(&self, request: OutboundRequest) -> Result<reqwest::Request, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidMethod(request.method.clone()))?;

        let mut headers = HeaderMap::new();
        extend_header_map(&mut headers, &request.headers);

        let mut builder = self.client.request(method, request.url.as_str());
        if let Some(content) = request.content {
            extend_header_map(&mut headers, &content.headers);
            builder = builder.body(content.text);
        }

        Ok(builder.headers(headers).build()?)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, TransportError> {
        let request = self.build(request)?;
        let response = self.client.execute(request).await?;

        let status = response.status().as_u16();
        let mut headers = HeaderBag::new();
        let mut content_headers = HeaderBag::new();
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            if CONTENT_HEADERS.contains(name.as_str()) {
                content_headers.append(name.as_str(), value);
            } else {
                headers.append(name.as_str(), value);
            }
        }

        let body = response.bytes().await?;

        Ok(OutboundResponse {
            status,
            headers,
            content_headers,
            body,
        })
    }
}

fn extend_header_map(map: &mut HeaderMap, bag: &HeaderBag) {
    for (name, values) in bag.iter() {
        let Ok(header_name) = HeaderName::from_bytes(name.as_bytes()) else {
            tracing::warn!(header = %name, "Dropping outbound header with invalid name");
            continue;
        };
        for value in values {
            match HeaderValue::from_bytes(value.as_bytes()) {
                Ok(v) => {
                    map.append(header_name.clone(), v);
                }
                Err(_) => {
                    tracing::warn!(header = %name, "Dropping outbound header with invalid value");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::model::OutboundContent;

    fn transport() -> HttpTransport {
        HttpTransport::new(&UpstreamConfig::default()).unwrap()
    }

    fn outbound(method: &str, url: &str) -> OutboundRequest {
        OutboundRequest {
            method: method.into(),
            url: url.into(),
            headers: HeaderBag::new(),
            content: None,
        }
    }

    #[test]
    fn builds_request_with_headers_and_body() {
        let mut req = outbound("POST", "http://downstream.test/api");
        req.headers.append("Authorization", "Bearer token");
        req.headers.append("Accept", "a");
        req.headers.append("Accept", "b");
        let mut content_headers = HeaderBag::new();
        content_headers.append("Content-Type", "application/json; charset=utf-8");
        req.content = Some(OutboundContent {
            text: "{}".into(),
            media_type: "application/json".into(),
            headers: content_headers,
        });

        let built = transport().build(req).unwrap();
        assert_eq!(*built.method(), Method::POST);
        assert_eq!(built.url().as_str(), "http://downstream.test/api");
        assert_eq!(built.headers()["authorization"], "Bearer token");
        assert_eq!(built.headers().get_all("accept").iter().count(), 2);
        assert_eq!(
            built.headers()["content-type"],
            "application/json; charset=utf-8"
        );
        let body = built.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(body, b"{}");
    }

    #[test]
    fn malformed_url_is_a_transport_error() {
        let err = transport().build(outbound("GET", "not a url")).unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }

    #[test]
    fn invalid_method_is_a_transport_error() {
        let err = transport().build(outbound("GE T", "http://a.test/")).unwrap_err();
        assert!(matches!(err, TransportError::InvalidMethod(m) if m == "GE T"));
    }

    #[tokio::test]
    async fn connection_refused_propagates() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport()
            .send(outbound("GET", &format!("http://{addr}/")))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}

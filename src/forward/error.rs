//! Error types for the forwarding core.

use thiserror::Error;

/// Failure of the outbound HTTP call. Fatal to a single forward.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Method string is not a valid HTTP token.
    #[error("invalid method '{0}'")]
    InvalidMethod(String),

    /// Connect, TLS, URL or protocol failure reported by the client.
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failure reported by a non-HTTP transport (used by test doubles).
    #[error("transport failure: {0}")]
    Other(String),
}

/// Errors surfaced by [`Forwarder::forward`](crate::forward::Forwarder::forward).
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The destination directive header is absent.
    #[error("missing {} header", crate::forward::headers::FORWARD_URL_HEADER)]
    MissingForwardUrl,

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Why a single header could not be attached. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderRejection {
    #[error("invalid header name")]
    InvalidName,

    #[error("invalid header value")]
    InvalidValue,

    /// Belongs to the content-header collection instead of the general one.
    #[error("content header")]
    ContentHeader,

    #[error("content header without a body")]
    NoContent,
}

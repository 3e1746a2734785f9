//! Forwarding core.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → translator.rs (skip set, cookie folding, body attachment)
//!     → OutboundRequest
//!     → transport.rs (one HTTP round trip, fully buffered)
//!     → OutboundResponse
//!     → composer.rs (status, body, filtered headers)
//!     → ForwardResult
//! ```
//!
//! # Design Decisions
//! - No state survives a forward; the skip sets are constants
//! - A bad header is logged and dropped, never fatal
//! - Transport failures propagate; downstream error statuses do not

pub mod composer;
pub mod error;
pub mod headers;
pub mod model;
pub mod service;
pub mod translator;
pub mod transport;

pub use error::{ForwardError, HeaderRejection, TransportError};
pub use headers::{CaseInsensitiveMap, CookieJar, FlatHeaders, HeaderBag, FORWARD_URL_HEADER};
pub use model::{ForwardResult, InboundRequest, OutboundRequest, OutboundResponse};
pub use service::Forwarder;
pub use transport::{HttpTransport, Transport};

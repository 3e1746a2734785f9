//! Single-hop HTTP forwarding relay.
//!
//! A caller names a destination in the `x-forward-url` header; the relay sends
//! the request there once and hands back the downstream status, body and
//! filtered headers.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::ForwardConfig;
pub use forward::{ForwardResult, Forwarder};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

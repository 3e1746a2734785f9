//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Relayed response:
//!     → headers.rs (compose Access-Control-Expose-Headers)
//!     → Send to client
//! ```
//!
//! CORS preflight handling and the inbound body limit are wired in
//! `http::server` from `SecurityConfig`.

pub mod headers;

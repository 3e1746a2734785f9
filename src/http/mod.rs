//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, directive check)
//!     → request.rs (request ID, inbound request, cookies)
//!     → forward core (translate, send, compose)
//!     → response.rs (status, headers, expose list, error mapping)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id_layer, UuidRequestId, X_REQUEST_ID};
pub use response::HandlerError;
pub use server::{AppState, HttpServer};

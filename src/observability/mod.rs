//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Forward operations produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows downstream as an ordinary header
//! - Metrics are cheap; recording without an installed recorder is a no-op

pub mod logging;
pub mod metrics;

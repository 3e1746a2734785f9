//! Metrics collection and exposition.
//!
//! # Metrics
//! - `forward_requests_total` (counter): forwards by method and status
//! - `forward_request_duration_seconds` (histogram): end-to-end latency
//! - `forward_header_drops_total` (counter): headers dropped by direction

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed forward.
pub fn record_request(method: &str, status: u16, start_time: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("forward_requests_total", &labels).increment(1);
    metrics::histogram!("forward_request_duration_seconds", &labels)
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a header dropped while copying in `direction` ("request" or "response").
pub fn record_header_drop(direction: &'static str) {
    metrics::counter!("forward_header_drops_total", "direction" => direction).increment(1);
}

//! Configuration schema definitions.
//!
//! All types derive `Deserialize` for deserialization from config files.

use serde::Deserialize;

/// Root configuration for the forwarding relay.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ForwardConfig {
    /// Listener configuration (bind address, route).
    pub listener: ListenerConfig,

    /// Host-side request timeout.
    pub timeouts: TimeoutConfig,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Body limits and CORS.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path that accepts forward requests, any method.
    pub forward_path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            forward_path: "/forward".to_string(),
        }
    }
}

/// Timeout applied by the host around the whole handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds. Dropping the handler cancels the
    /// in-flight downstream call.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 120 }
    }
}

/// Outbound HTTP client configuration. Built once, shared by every forward.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Skip TLS certificate validation for downstream hosts.
    pub accept_invalid_certs: bool,

    /// Follow downstream redirects.
    pub follow_redirects: bool,

    /// Redirect hop limit when following.
    pub max_redirects: usize,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total time for one downstream round trip in seconds.
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            follow_redirects: true,
            max_redirects: 10,
            connect_timeout_secs: 10,
            request_timeout_secs: 100,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Request limits and cross-origin policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,

    /// Answer CORS preflights and allow any origin, method and header.
    pub cors_enabled: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 10 * 1024 * 1024, // 10MB
            cors_enabled: true,
        }
    }
}

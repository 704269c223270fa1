//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Defaults carry the documented constants, so `RelayConfig::default()`
//! is a complete working configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration for the backend binary.
    pub listener: ListenerConfig,

    /// Escape scheme constants.
    pub escape: EscapeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8188").
    pub bind_address: String,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8188".to_string(),
            request_timeout_secs: 30,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Escape scheme constants.
///
/// Fixed at startup; the same values must be configured on the client and
/// the backend for the round trip to hold.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EscapeConfig {
    /// Reserved namespace prefix whose trailing separator is protected.
    pub namespace: String,

    /// Marker substituted for the protected separator. Must not collide
    /// with legitimate filename content.
    pub marker: String,

    /// Substrings identifying requests that address the namespaced API.
    pub api_markers: Vec<String>,
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self {
            namespace: "workflows/".to_string(),
            marker: "__SLASH__".to_string(),
            api_markers: vec!["/api/userdata/".to_string(), "/userdata/".to_string()],
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON instead of the human-readable format.
    pub log_json: bool,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_rewrites_total` (counter): rewrites by direction
//!   (`outbound` = client escape, `inbound` = backend restore)
//! - `relay_requests_total` (counter): backend requests by method, status
//! - `relay_request_duration_seconds` (histogram): latency distribution

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on the given address.
///
/// Failure to install is logged and otherwise ignored; metrics are
/// diagnostics, not a correctness dependency.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Count one rewrite decision.
pub fn record_rewrite(direction: &'static str) {
    metrics::counter!("relay_rewrites_total", "direction" => direction).increment(1);
}

/// Count one backend request and record its latency.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let status = status.to_string();
    metrics::counter!(
        "relay_requests_total",
        "method" => method.clone(),
        "status" => status.clone()
    )
    .increment(1);
    metrics::histogram!(
        "relay_request_duration_seconds",
        "method" => method,
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

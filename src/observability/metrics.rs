//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by path, status
//! - `site_request_duration_seconds` (histogram): latency distribution
//! - `site_nav_links_rendered_total` (counter): nav links by active state
//! - `site_image_placeholder_total` (counter): placeholder fetches by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::ui::class::StyleState;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics exporter"),
    }
}

pub fn record_request(path: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "site_requests_total",
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("site_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_nav_link(state: StyleState) {
    ::metrics::counter!("site_nav_links_rendered_total", "state" => state.as_str()).increment(1);
}

pub fn record_image_placeholder(outcome: &'static str) {
    ::metrics::counter!("site_image_placeholder_total", "outcome" => outcome).increment(1);
}

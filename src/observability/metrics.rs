//! Metrics collection and exposition.
//!
//! # Metrics
//! - `auth_converter_requests_total` (counter): requests seen by the converter,
//!   labelled by `outcome` (`converted` or the failure kind)

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub const REQUESTS_TOTAL: &str = "auth_converter_requests_total";

pub const OUTCOME_CONVERTED: &str = "converted";

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            ::metrics::describe_counter!(
                REQUESTS_TOTAL,
                "Requests seen by the auth converter, by outcome"
            );
            tracing::info!(address = %addr, "Metrics endpoint listening");
        }
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Count one pass through the converter.
pub fn record_conversion(outcome: &'static str) {
    ::metrics::counter!(REQUESTS_TOTAL, "outcome" => outcome).increment(1);
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `hub_routes_added_total` (counter): routes pushed to the proxy
//! - `hub_routes_removed_total` (counter): stale routes deleted
//! - `hub_route_failures_total` (counter): per-route corrections that failed
//! - `hub_reconcile_passes_total` (counter): completed passes
//! - `hub_reconcile_errors_total` (counter): passes that could not run
//! - `hub_expected_routes` (gauge): size of the desired routing table
//! - `hub_reconcile_duration_seconds` (histogram): pass latency

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

use crate::reconcile::ReconcileReport;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter started");
            describe_metrics();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

fn describe_metrics() {
    describe_counter!("hub_routes_added_total", "Routes pushed to the proxy");
    describe_counter!("hub_routes_removed_total", "Stale routes deleted from the proxy");
    describe_counter!("hub_route_failures_total", "Per-route corrections that failed");
    describe_counter!("hub_reconcile_passes_total", "Completed reconciliation passes");
    describe_counter!("hub_reconcile_errors_total", "Passes that could not run");
    describe_gauge!("hub_expected_routes", "Size of the desired routing table");
    describe_histogram!("hub_reconcile_duration_seconds", "Reconciliation pass latency");
}

/// Record the outcome of a completed pass.
pub fn record_pass(report: &ReconcileReport, expected_routes: usize, elapsed: Duration) {
    counter!("hub_reconcile_passes_total").increment(1);
    counter!("hub_routes_added_total").increment(report.added as u64);
    counter!("hub_routes_removed_total").increment(report.removed as u64);
    counter!("hub_route_failures_total").increment(report.failures.len() as u64);
    gauge!("hub_expected_routes").set(expected_routes as f64);
    histogram!("hub_reconcile_duration_seconds").record(elapsed.as_secs_f64());
}

/// Record a pass that failed before it could diff anything.
pub fn record_failed_pass() {
    counter!("hub_reconcile_errors_total").increment(1);
}

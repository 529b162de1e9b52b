// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    CounterVec, HistogramVec, IntCounter, Opts, Registry, TextEncoder, Encoder,
    register_counter_vec_with_registry, register_histogram_vec_with_registry,
    register_int_counter_with_registry,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of HTTP requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("http_requests_total", "Total number of HTTP requests"),
        &["method", "route", "status_code"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("http_request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]),
        &["method", "route", "status_code"],
        REGISTRY
    ).unwrap();

    /// Requests rejected by the rate limiter
    pub static ref RATE_LIMITED: IntCounter = register_int_counter_with_registry!(
        Opts::new("rate_limited_requests_total", "Requests rejected with 429"),
        REGISTRY
    ).unwrap();

    // ============================================================================
    // DOMAIN METRICS
    // ============================================================================

    // Sector and sensor type are client-supplied, so they stay out of the labels.

    /// Projects created through the API
    pub static ref PROJECTS_CREATED: IntCounter = register_int_counter_with_registry!(
        Opts::new("projects_created_total", "Projects created through the API"),
        REGISTRY
    ).unwrap();

    /// Sensor readings submitted
    pub static ref SENSOR_READINGS: IntCounter = register_int_counter_with_registry!(
        Opts::new("sensor_readings_total", "Sensor readings submitted"),
        REGISTRY
    ).unwrap();

    /// Loyalty points handed out
    pub static ref LOYALTY_POINTS: IntCounter = register_int_counter_with_registry!(
        Opts::new("loyalty_points_awarded_total", "Loyalty points awarded"),
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        RATE_LIMITED.inc();
        LOYALTY_POINTS.inc_by(1);
        PROJECTS_CREATED.inc();
        SENSOR_READINGS.inc();
        REQUESTS_TOTAL.with_label_values(&["GET", "/health", "200"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("http_requests_total"));
        assert!(metrics.contains("rate_limited_requests_total"));
        assert!(metrics.contains("projects_created_total"));
        assert!(metrics.contains("sensor_readings_total"));
        assert!(metrics.contains("loyalty_points_awarded_total"));
    }
}

// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    RATE_LIMITED,
    PROJECTS_CREATED,
    SENSOR_READINGS,
    LOYALTY_POINTS,
};

/// Helper to record request metrics
pub fn record_request(method: &str, route: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();
    REQUESTS_TOTAL
        .with_label_values(&[method, route, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, route, &status])
        .observe(duration_secs);
}

pub fn record_rate_limited() {
    RATE_LIMITED.inc();
}

/// Helpers to record store writes
pub fn record_project_created() {
    PROJECTS_CREATED.inc();
}

pub fn record_sensor_reading() {
    SENSOR_READINGS.inc();
}

pub fn record_points_awarded(points: u64) {
    LOYALTY_POINTS.inc_by(points);
}

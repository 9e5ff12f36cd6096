// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics, REQUESTS_TOTAL, REQUEST_DURATION, VERTEX_API_CALLS, VERTEX_API_DURATION,
};

/// Helper to record request metrics
pub fn record_request(method: &str, status_code: u16, duration_secs: f64) {
    let status = status_code.to_string();

    REQUESTS_TOTAL.with_label_values(&[method, &status]).inc();

    REQUEST_DURATION
        .with_label_values(&[method, &status])
        .observe(duration_secs);
}

/// Helper to record Vertex AI call metrics
pub fn record_vertex_call(model: &str, outcome: &str, duration_secs: f64) {
    VERTEX_API_CALLS.with_label_values(&[model, outcome]).inc();

    VERTEX_API_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

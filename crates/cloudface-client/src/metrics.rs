//! Face API metrics collection.
//!
//! Provides standardized metrics for monitoring Face API usage:
//! - Request counters by operation and status
//! - Latency histograms
//! - Retry and training-poll counters

use metrics::{counter, histogram};

// =============================================================================
// Metric Names
// =============================================================================

/// Metric name constants for consistency.
pub mod names {
    /// Total Face API requests by operation and status.
    pub const REQUESTS_TOTAL: &str = "cloudface_api_requests_total";

    /// Total retry attempts by operation.
    pub const RETRIES_TOTAL: &str = "cloudface_api_retries_total";

    /// Request duration in seconds by operation.
    pub const REQUEST_DURATION_SECONDS: &str = "cloudface_api_request_duration_seconds";

    /// Training-status polls by observed state.
    pub const TRAINING_POLLS_TOTAL: &str = "cloudface_training_polls_total";

    /// Faces submitted to identify calls.
    pub const IDENTIFY_FACES_TOTAL: &str = "cloudface_identify_faces_total";
}

// =============================================================================
// Recording Functions
// =============================================================================

/// Record metrics for a completed Face API request.
pub fn record_request(operation: &str, status: u16, latency_ms: f64) {
    let status_str = status.to_string();

    counter!(
        names::REQUESTS_TOTAL,
        "operation" => operation.to_string(),
        "status" => status_str
    )
    .increment(1);

    histogram!(
        names::REQUEST_DURATION_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_ms / 1000.0);
}

/// Record a retry attempt.
pub fn record_retry(operation: &str) {
    counter!(
        names::RETRIES_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}

/// Record one training-status poll and the state it observed.
pub fn record_training_poll(state: &str) {
    counter!(
        names::TRAINING_POLLS_TOTAL,
        "state" => state.to_string()
    )
    .increment(1);
}

/// Record the number of faces sent to an identify call.
pub fn record_identify_faces(count: usize) {
    counter!(names::IDENTIFY_FACES_TOTAL).increment(count as u64);
}

// =============================================================================
// Tests
// =============================================================================

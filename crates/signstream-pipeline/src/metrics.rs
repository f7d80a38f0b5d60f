//! Pipeline metrics.

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const FRAMES_TOTAL: &str = "signstream_frames_total";
    pub const FRAMES_SKIPPED_TOTAL: &str = "signstream_frames_skipped_total";
    pub const PREDICTIONS_ACCEPTED_TOTAL: &str = "signstream_predictions_accepted_total";
    pub const PREDICTIONS_REJECTED_TOTAL: &str = "signstream_predictions_rejected_total";
    pub const INFERENCE_ERRORS_TOTAL: &str = "signstream_inference_errors_total";
    pub const TICK_DURATION_SECONDS: &str = "signstream_tick_duration_seconds";
}

/// Record one processed frame.
pub fn record_frame() {
    counter!(names::FRAMES_TOTAL).increment(1);
}

/// Record a frame the window admission policy skipped.
pub fn record_frame_skipped() {
    counter!(names::FRAMES_SKIPPED_TOTAL).increment(1);
}

/// Record an accepted prediction.
pub fn record_accepted(label: &str) {
    let labels = [("label", label.to_string())];
    counter!(names::PREDICTIONS_ACCEPTED_TOTAL, &labels).increment(1);
}

/// Record a below-threshold rejection.
pub fn record_rejected() {
    counter!(names::PREDICTIONS_REJECTED_TOTAL).increment(1);
}

/// Record a classifier fault handled by the reject-and-continue policy.
pub fn record_inference_error() {
    counter!(names::INFERENCE_ERRORS_TOTAL).increment(1);
}

/// Record one tick's processing duration.
pub fn record_tick_duration(duration_secs: f64) {
    histogram!(names::TICK_DURATION_SECONDS).record(duration_secs);
}

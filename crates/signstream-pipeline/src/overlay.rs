//! Live overlay seam.
//!
//! On-screen rendering is external; the pipeline only pushes the current
//! display state out through this sink once per tick.

use tracing::{debug, info, trace};

use signstream_models::DisplayState;

/// Receiver for the per-tick display state.
pub trait OverlaySink {
    fn show(&mut self, state: &DisplayState);
}

/// Overlay that reports state through structured logs: accepted
/// predictions at info, rejections at debug, accumulation at trace.
#[derive(Debug, Default)]
pub struct TracingOverlay;

impl OverlaySink for TracingOverlay {
    fn show(&mut self, state: &DisplayState) {
        match state {
            DisplayState::Accumulating => trace!("Window accumulating"),
            DisplayState::Accepted { label, confidence } => {
                info!(label = %label, confidence = %confidence, "Prediction accepted");
            }
            DisplayState::Rejected { confidence } => {
                debug!(confidence = %confidence, "Below threshold");
            }
        }
    }
}

/// Overlay that discards every state, for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullOverlay;

impl OverlaySink for NullOverlay {
    fn show(&mut self, _state: &DisplayState) {}
}

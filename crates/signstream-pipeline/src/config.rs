//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use signstream_models::{InferenceErrorPolicy, PushPolicy, DEFAULT_FEATURE_LEN};

use crate::error::{PipelineError, PipelineResult};

/// Configuration for the streaming classification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Sliding-window length in frames (default: 30, one second of
    /// capture at the default frame rate)
    pub window_len: usize,

    /// Slots per feature vector, trailing capture timestamp included
    /// (default: 129, the layout the shipped models are trained on)
    pub feature_len: usize,

    /// Minimum classifier probability to accept a prediction; must be
    /// strictly exceeded (default: 0.8)
    pub confidence_threshold: f64,

    /// Throughput cap in frames per second; `None` runs unpaced
    /// (default: 30 fps)
    pub target_fps: Option<f64>,

    /// Window admission policy for blank "no detection" frames
    pub push_policy: PushPolicy,

    /// What to do when the classifier fails on a tick
    pub inference_error_policy: InferenceErrorPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_len: 30,
            feature_len: DEFAULT_FEATURE_LEN,
            confidence_threshold: 0.8,
            target_fps: Some(30.0),
            push_policy: PushPolicy::default(),
            inference_error_policy: InferenceErrorPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Configuration that only accumulates frames with an actual
    /// detection, denoising the sequence fed to the classifier at the
    /// cost of slower window fill during detection gaps.
    pub fn denoised() -> Self {
        Self {
            push_policy: PushPolicy::DetectionOnly,
            ..Default::default()
        }
    }

    /// Validate the configuration before a run.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.window_len == 0 {
            return Err(PipelineError::invalid_config("window_len must be nonzero"));
        }
        if self.feature_len == 0 {
            return Err(PipelineError::invalid_config("feature_len must be nonzero"));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(PipelineError::invalid_config(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        if let Some(fps) = self.target_fps {
            if fps <= 0.0 || !fps.is_finite() {
                return Err(PipelineError::invalid_config(format!(
                    "target_fps must be positive and finite, got {fps}"
                )));
            }
        }
        Ok(())
    }
}

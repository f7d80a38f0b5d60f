//! Error types for pipeline operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors that can occur while running the classification pipeline.
///
/// Two conditions deliberately have no variant here: an exhausted frame
/// source is the normal termination path (`None` from the source), and a
/// frame with no detectable hand is ordinary data (a blank vector).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Feature vector length mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Classifier returned an empty distribution")]
    EmptyDistribution,

    #[error("Classifier output index {0} has no label")]
    UnknownLabel(usize),

    #[error("Unsupported frame payload: {0}")]
    UnsupportedPayload(&'static str),

    #[error("Model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Model load failed: {0}")]
    ModelLoad(String),

    #[error("Label map load failed for {path}: {message}")]
    LabelMapLoad { path: PathBuf, message: String },

    #[error("Prediction log persistence failed for {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl PipelineError {
    /// Create an inference failure error.
    pub fn inference(message: impl Into<String>) -> Self {
        Self::Inference(message.into())
    }

    /// Create a model load error.
    pub fn model_load(message: impl Into<String>) -> Self {
        Self::ModelLoad(message.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Whether this error is a per-tick classifier fault, subject to the
    /// configured inference-error policy rather than unconditionally
    /// fatal.
    pub fn is_inference_fault(&self) -> bool {
        matches!(
            self,
            Self::Inference(_) | Self::EmptyDistribution | Self::UnknownLabel(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inference_fault_classification() {
        assert!(PipelineError::inference("boom").is_inference_fault());
        assert!(PipelineError::EmptyDistribution.is_inference_fault());
        assert!(PipelineError::UnknownLabel(7).is_inference_fault());

        let shape = PipelineError::ShapeMismatch {
            expected: 129,
            actual: 64,
        };
        assert!(!shape.is_inference_fault());
    }
}

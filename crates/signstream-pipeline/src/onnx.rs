//! ONNX Runtime sequence classifier.
//!
//! Wraps an exported sequence model (LSTM or similar) behind the
//! `SequenceClassifier` trait. The window is packed as a `[1, N, F]`
//! tensor, the first output is read back as logits, and softmax is
//! applied unconditionally so the gate always sees a probability
//! distribution.

use std::path::Path;

use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::{Tensor, Value};
use tracing::{debug, info};

use signstream_models::FeatureVector;

use crate::classify::SequenceClassifier;
use crate::error::{PipelineError, PipelineResult};

/// Sequence classifier backed by an ONNX Runtime session.
#[derive(Debug)]
pub struct OnnxSequenceClassifier {
    session: Session,
    feature_len: usize,
}

impl OnnxSequenceClassifier {
    /// Load the model from disk.
    ///
    /// Returns `ModelNotFound` when the file is absent and `ModelLoad`
    /// when the session cannot be built.
    pub fn load(model_path: &Path, feature_len: usize) -> PipelineResult<Self> {
        if !model_path.exists() {
            return Err(PipelineError::ModelNotFound(model_path.to_path_buf()));
        }

        let model_bytes = std::fs::read(model_path)
            .map_err(|e| PipelineError::model_load(format!("read model file: {e}")))?;

        let session = Session::builder()
            .map_err(|e| PipelineError::model_load(format!("session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PipelineError::model_load(format!("optimization level: {e}")))?
            .commit_from_memory(&model_bytes)
            .map_err(|e| PipelineError::model_load(format!("load model: {e}")))?;

        info!(
            model_path = %model_path.display(),
            feature_len,
            "Sequence classifier initialized"
        );

        Ok(Self {
            session,
            feature_len,
        })
    }

    /// Pack a window into a `[1, N, F]` input tensor.
    fn pack_window(&self, window: &[FeatureVector]) -> PipelineResult<Value> {
        let mut flat = Vec::with_capacity(window.len() * self.feature_len);
        for vector in window {
            if vector.len() != self.feature_len {
                return Err(PipelineError::ShapeMismatch {
                    expected: self.feature_len,
                    actual: vector.len(),
                });
            }
            flat.extend_from_slice(vector.values());
        }

        let shape = vec![1usize, window.len(), self.feature_len];
        Tensor::from_array((shape, flat.into_boxed_slice()))
            .map(Value::from)
            .map_err(|e| PipelineError::inference(format!("ORT tensor: {e}")))
    }
}

impl SequenceClassifier for OnnxSequenceClassifier {
    fn infer(&mut self, window: &[FeatureVector]) -> PipelineResult<Vec<f32>> {
        let input = self.pack_window(window)?;

        let outputs = self
            .session
            .run(ort::inputs![input])
            .map_err(|e| PipelineError::inference(format!("ONNX run failed: {e}")))?;

        let output = match outputs.get("output") {
            Some(value) => value.view(),
            None => outputs
                .iter()
                .next()
                .map(|(_, value)| value)
                .ok_or_else(|| PipelineError::inference("classifier returned no outputs"))?,
        };

        let (_, logits) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| PipelineError::inference(format!("extract tensor: {e}")))?;

        if logits.is_empty() {
            return Err(PipelineError::EmptyDistribution);
        }

        let distribution = softmax(logits);
        debug!(classes = distribution.len(), "Inference completed");
        Ok(distribution)
    }
}

/// Numerically stable softmax over raw logits.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}

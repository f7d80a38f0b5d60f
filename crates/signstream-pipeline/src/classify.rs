//! Sequence classification seam.

use signstream_models::FeatureVector;

use crate::error::PipelineResult;

/// Classifier over a full window of feature vectors.
///
/// Returns a probability distribution over the fixed label set. The model
/// behind an implementation is loaded once at startup and never mutated
/// during a run; `infer` is pure inference.
pub trait SequenceClassifier {
    fn infer(&mut self, window: &[FeatureVector]) -> PipelineResult<Vec<f32>>;
}

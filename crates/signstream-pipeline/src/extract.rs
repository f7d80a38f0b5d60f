//! Feature extraction seam.

use signstream_models::FeatureVector;

use crate::error::PipelineResult;
use crate::source::RawFrame;

/// Converts one raw frame into a fixed-length feature vector.
///
/// A frame with no detectable subject yields a blank vector of the
/// configured length, never an error — absence is ordinary data. The
/// pipeline enforces the configured length on every returned vector and
/// aborts on a mismatch.
pub trait FeatureExtractor {
    fn extract(&mut self, frame: &RawFrame) -> PipelineResult<FeatureVector>;
}

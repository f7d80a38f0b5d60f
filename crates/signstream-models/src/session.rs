//! Recorded landmark sessions.
//!
//! A recorded session is the persisted form of one capture: the per-frame
//! feature vectors a live run would have produced, replayable through the
//! pipeline without a camera.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::feature::FeatureVector;

/// One recorded capture of per-frame feature vectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordedSession {
    /// When the capture was made, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,

    /// Capture frame rate, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,

    /// Per-frame feature vectors in capture order.
    pub frames: Vec<Vec<f32>>,
}

impl RecordedSession {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Slot count of the first frame, if any. Frames are expected to be
    /// uniform; the pipeline enforces the configured length per frame.
    pub fn feature_len(&self) -> Option<usize> {
        self.frames.first().map(Vec::len)
    }

    /// Frames converted into feature vectors, capture order preserved.
    pub fn into_feature_vectors(self) -> Vec<FeatureVector> {
        self.frames.into_iter().map(FeatureVector::new).collect()
    }
}

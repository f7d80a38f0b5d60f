//! Fixed-length per-frame feature vectors.
//!
//! One `FeatureVector` encodes a single frame's detected hand signal:
//! per-hand handedness confidence and wrist-relative landmark coordinates,
//! with the capture timestamp at the fixed final slot. The length is
//! constant for the lifetime of a run; a frame with no visible hand is a
//! vector of the same length with every informative slot zeroed, so the
//! classifier window never goes ragged.

use serde::{Deserialize, Serialize};

/// Default feature-vector length: 2 hands x (1 handedness confidence +
/// 21 landmarks x 3 coordinates) + 1 trailing capture timestamp.
pub const DEFAULT_FEATURE_LEN: usize = 129;

/// Feature vector for a single frame.
///
/// Serializes transparently as a flat array of floats, the on-disk form
/// used by recorded landmark sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    /// Wrap a raw vector of slot values.
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// A "no detection" frame: all informative slots zeroed, only the
    /// trailing timestamp slot set.
    pub fn blank(len: usize, timestamp: f32) -> Self {
        let mut values = vec![0.0; len];
        if let Some(last) = values.last_mut() {
            *last = timestamp;
        }
        Self(values)
    }

    /// Number of slots, including the trailing timestamp.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All slot values, timestamp last.
    pub fn values(&self) -> &[f32] {
        &self.0
    }

    /// Capture timestamp stored in the final slot.
    pub fn timestamp(&self) -> Option<f32> {
        self.0.last().copied()
    }

    /// Whether any informative slot (everything but the trailing
    /// timestamp) is nonzero.
    pub fn has_detection(&self) -> bool {
        match self.0.split_last() {
            Some((_, informative)) => informative.iter().any(|v| *v != 0.0),
            None => false,
        }
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.0
    }
}

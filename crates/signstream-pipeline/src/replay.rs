//! Replay of recorded landmark sessions.
//!
//! A recorded session stands in for the camera-plus-extractor pair: the
//! source yields one feature-payload frame per tick, and the extractor
//! just unwraps it. This is how the runner drives the full pipeline from
//! a prior capture.

use std::fs;
use std::path::Path;

use tracing::info;

use signstream_models::{FeatureVector, RecordedSession};

use crate::error::{PipelineError, PipelineResult};
use crate::extract::FeatureExtractor;
use crate::source::{FramePayload, FrameSource, RawFrame};

/// Frame source over a recorded session, exhausted after the last frame.
#[derive(Debug)]
pub struct ReplaySource {
    frames: std::vec::IntoIter<FeatureVector>,
    next_index: u64,
}

impl ReplaySource {
    pub fn new(session: RecordedSession) -> Self {
        Self {
            frames: session.into_feature_vectors().into_iter(),
            next_index: 0,
        }
    }

    /// Load a recorded session JSON file.
    pub fn from_path(path: &Path) -> PipelineResult<Self> {
        let text = fs::read_to_string(path)?;
        let session: RecordedSession = serde_json::from_str(&text)?;
        info!(
            path = %path.display(),
            frames = session.frame_count(),
            "Recorded session loaded"
        );
        Ok(Self::new(session))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for ReplaySource {
    fn next_frame(&mut self) -> Option<RawFrame> {
        let vector = self.frames.next()?;
        let frame = RawFrame::features(self.next_index, vector);
        self.next_index += 1;
        Some(frame)
    }
}

/// Extractor for feature-payload frames; never decodes pixels.
#[derive(Debug, Default)]
pub struct RecordedExtractor;

impl FeatureExtractor for RecordedExtractor {
    fn extract(&mut self, frame: &RawFrame) -> PipelineResult<FeatureVector> {
        match &frame.payload {
            FramePayload::Features(vector) => Ok(vector.clone()),
            FramePayload::Image(_) => Err(PipelineError::UnsupportedPayload(
                "image payload on the replay path",
            )),
        }
    }
}

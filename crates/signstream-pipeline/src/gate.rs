//! Confidence gating of classifier output.
//!
//! The gate selects the arg-max label from a probability distribution and
//! accepts it only when its probability strictly exceeds the configured
//! threshold. Label resolution happens only on accept, against a mapping
//! fixed at startup.

use signstream_models::LabelMap;

use crate::error::{PipelineError, PipelineResult};

/// Outcome of gating one classifier evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// Confidence strictly exceeded the threshold; the label is resolved
    /// and the prediction should be logged.
    Accepted {
        index: usize,
        label: String,
        confidence: f64,
    },

    /// Confidence at or below the threshold; nothing is logged.
    Rejected { confidence: f64 },
}

/// Threshold gate over classifier probability distributions.
#[derive(Debug)]
pub struct ClassifierGate {
    threshold: f64,
    labels: LabelMap,
}

impl ClassifierGate {
    pub fn new(threshold: f64, labels: LabelMap) -> Self {
        Self { threshold, labels }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Gate one probability distribution.
    ///
    /// An empty or all-NaN distribution is a classifier fault, as is an
    /// accepted arg-max index with no entry in the label map.
    pub fn evaluate(&self, distribution: &[f32]) -> PipelineResult<GateDecision> {
        let mut best: Option<(usize, f32)> = None;
        for (index, probability) in distribution.iter().enumerate() {
            if probability.is_nan() {
                continue;
            }
            match best {
                Some((_, current)) if *probability <= current => {}
                _ => best = Some((index, *probability)),
            }
        }

        let (index, probability) = best.ok_or(PipelineError::EmptyDistribution)?;
        let confidence = f64::from(probability);

        // Compared at the classifier's f32 precision: widening first would
        // nudge a probability equal to the threshold past an f64 threshold
        // and break the strict inequality.
        if probability > self.threshold as f32 {
            let label = self
                .labels
                .resolve(index)
                .ok_or(PipelineError::UnknownLabel(index))?
                .to_string();
            Ok(GateDecision::Accepted {
                index,
                label,
                confidence,
            })
        } else {
            Ok(GateDecision::Rejected { confidence })
        }
    }
}

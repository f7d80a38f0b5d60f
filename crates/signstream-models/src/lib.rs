//! Shared data models for the SignStream recognition pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Per-frame feature vectors and recorded landmark sessions
//! - Predictions and the append-only prediction log
//! - Class-index label resolution
//! - The live overlay state machine
//! - Pipeline policy knobs

pub mod display;
pub mod feature;
pub mod labels;
pub mod policy;
pub mod prediction;
pub mod session;

// Re-export common types
pub use display::{DisplayState, ACCUMULATING_TEXT, REJECTED_TEXT};
pub use feature::{FeatureVector, DEFAULT_FEATURE_LEN};
pub use labels::{LabelMap, LabelMapError};
pub use policy::{InferenceErrorPolicy, PolicyParseError, PushPolicy};
pub use prediction::{Prediction, PredictionLog};
pub use session::RecordedSession;

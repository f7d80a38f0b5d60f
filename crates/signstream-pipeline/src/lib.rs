#![deny(unreachable_patterns)]
//! Streaming sign-language classification pipeline.
//!
//! This crate provides:
//! - A bounded FIFO window over per-frame feature vectors
//! - Confidence gating of classifier output with label resolution
//! - Tick pacing against a target frame rate
//! - Prediction-log persistence (load at startup, rewrite at shutdown)
//! - Collaborator seams for frame sources, feature extractors,
//!   classifiers, overlays and quit signals
//! - An ONNX Runtime classifier and a recorded-session replay source

pub mod classify;
pub mod config;
pub mod control;
pub mod error;
pub mod extract;
pub mod gate;
pub mod labels;
pub mod metrics;
#[cfg(feature = "onnx")]
pub mod onnx;
pub mod overlay;
pub mod pacing;
pub mod pipeline;
pub mod replay;
pub mod source;
pub mod store;
pub mod window;

// Re-export common types
pub use classify::SequenceClassifier;
pub use config::PipelineConfig;
pub use control::{FlagQuit, Never, QuitSignal};
pub use error::{PipelineError, PipelineResult};
pub use extract::FeatureExtractor;
pub use gate::{ClassifierGate, GateDecision};
pub use labels::load_label_map;
#[cfg(feature = "onnx")]
pub use onnx::OnnxSequenceClassifier;
pub use overlay::{NullOverlay, OverlaySink, TracingOverlay};
pub use pacing::Pacer;
pub use pipeline::{RunSummary, StreamPipeline, StreamPipelineBuilder};
pub use replay::{RecordedExtractor, ReplaySource};
pub use source::{FramePayload, FrameSource, RawFrame};
pub use store::PredictionLogStore;
pub use window::SlidingWindow;

//! The streaming classification pipeline controller.
//!
//! One controller object owns the window, gate, pacer, prediction log and
//! every collaborator, and drives the straight-line tick loop:
//! acquire frame → extract features → shape check → window push → when
//! full: classify and gate → overlay → quit check → pace-sleep. There is
//! no hidden shared state and no concurrency; each tick is fully
//! synchronous on the calling thread.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use signstream_models::{DisplayState, InferenceErrorPolicy, LabelMap, Prediction, PredictionLog};

use crate::classify::SequenceClassifier;
use crate::config::PipelineConfig;
use crate::control::{Never, QuitSignal};
use crate::error::{PipelineError, PipelineResult};
use crate::extract::FeatureExtractor;
use crate::gate::{ClassifierGate, GateDecision};
use crate::metrics;
use crate::overlay::{OverlaySink, TracingOverlay};
use crate::pacing::Pacer;
use crate::source::{FrameSource, RawFrame};
use crate::store::PredictionLogStore;
use crate::window::SlidingWindow;

/// Counters for one completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Ticks executed (frames acquired).
    pub ticks: u64,
    /// Vectors admitted into the window.
    pub frames_pushed: u64,
    /// Predictions accepted and logged.
    pub accepted: u64,
    /// Evaluations below the confidence threshold.
    pub rejected: u64,
    /// Classifier faults absorbed by the reject-and-continue policy.
    pub inference_errors: u64,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Builder for a `StreamPipeline`.
///
/// # Example
///
/// ```ignore
/// let pipeline = StreamPipelineBuilder::new(PipelineConfig::default())
///     .with_label_map(label_map)
///     .with_source(Box::new(source))
///     .with_extractor(Box::new(RecordedExtractor))
///     .with_classifier(Box::new(classifier))
///     .with_store(PredictionLogStore::new("prediction_log.json"))
///     .build()?;
/// let summary = pipeline.run()?;
/// ```
pub struct StreamPipelineBuilder {
    config: PipelineConfig,
    label_map: Option<LabelMap>,
    source: Option<Box<dyn FrameSource>>,
    extractor: Option<Box<dyn FeatureExtractor>>,
    classifier: Option<Box<dyn SequenceClassifier>>,
    overlay: Box<dyn OverlaySink>,
    quit: Box<dyn QuitSignal>,
    store: Option<PredictionLogStore>,
}

impl StreamPipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            label_map: None,
            source: None,
            extractor: None,
            classifier: None,
            overlay: Box::new(TracingOverlay),
            quit: Box::new(Never),
            store: None,
        }
    }

    pub fn with_label_map(mut self, label_map: LabelMap) -> Self {
        self.label_map = Some(label_map);
        self
    }

    pub fn with_source(mut self, source: Box<dyn FrameSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_extractor(mut self, extractor: Box<dyn FeatureExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn SequenceClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_overlay(mut self, overlay: Box<dyn OverlaySink>) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_quit(mut self, quit: Box<dyn QuitSignal>) -> Self {
        self.quit = quit;
        self
    }

    /// Persist the prediction log at this path: loaded at build so new
    /// predictions append to the prior run's entries, rewritten once at
    /// clean shutdown.
    pub fn with_store(mut self, store: PredictionLogStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> PipelineResult<StreamPipeline> {
        self.config.validate()?;

        let label_map = self
            .label_map
            .ok_or_else(|| PipelineError::invalid_config("a label map is required"))?;
        let source = self
            .source
            .ok_or_else(|| PipelineError::invalid_config("a frame source is required"))?;
        let extractor = self
            .extractor
            .ok_or_else(|| PipelineError::invalid_config("a feature extractor is required"))?;
        let classifier = self
            .classifier
            .ok_or_else(|| PipelineError::invalid_config("a classifier is required"))?;

        let log = match &self.store {
            Some(store) => store.load(),
            None => PredictionLog::new(),
        };

        Ok(StreamPipeline {
            window: SlidingWindow::new(self.config.window_len, self.config.push_policy),
            gate: ClassifierGate::new(self.config.confidence_threshold, label_map),
            pacer: Pacer::from_fps(self.config.target_fps),
            config: self.config,
            log,
            store: self.store,
            source,
            extractor,
            classifier,
            overlay: self.overlay,
            quit: self.quit,
        })
    }
}

/// The streaming classification pipeline.
pub struct StreamPipeline {
    config: PipelineConfig,
    window: SlidingWindow,
    gate: ClassifierGate,
    pacer: Pacer,
    log: PredictionLog,
    store: Option<PredictionLogStore>,
    source: Box<dyn FrameSource>,
    extractor: Box<dyn FeatureExtractor>,
    classifier: Box<dyn SequenceClassifier>,
    overlay: Box<dyn OverlaySink>,
    quit: Box<dyn QuitSignal>,
}

impl std::fmt::Debug for StreamPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamPipeline")
            .field("config", &self.config)
            .field("window", &self.window)
            .field("gate", &self.gate)
            .field("pacer", &self.pacer)
            .field("log", &self.log)
            .field("store", &self.store)
            .field("source", &"<dyn FrameSource>")
            .field("extractor", &"<dyn FeatureExtractor>")
            .field("classifier", &"<dyn SequenceClassifier>")
            .field("overlay", &"<dyn OverlaySink>")
            .field("quit", &"<dyn QuitSignal>")
            .finish()
    }
}

impl StreamPipeline {
    /// Run the tick loop until the source is exhausted or a quit signal
    /// arrives, then persist the log exactly once.
    ///
    /// Fatal errors abort without saving; predictions made since the last
    /// successful save are lost in that case.
    pub fn run(mut self) -> PipelineResult<RunSummary> {
        let started = Instant::now();
        let mut summary = RunSummary::default();

        info!(
            window_len = self.config.window_len,
            feature_len = self.config.feature_len,
            threshold = self.config.confidence_threshold,
            push_policy = %self.config.push_policy,
            "Starting streaming classification"
        );

        loop {
            let tick_started = Instant::now();

            let Some(frame) = self.source.next_frame() else {
                debug!("Frame source exhausted");
                break;
            };

            let state = self.tick(&frame, started, &mut summary)?;
            self.overlay.show(&state);

            summary.ticks += 1;
            metrics::record_tick_duration(tick_started.elapsed().as_secs_f64());

            if self.quit.should_quit() {
                debug!("Quit signal received");
                break;
            }

            self.pacer.pace(tick_started);
        }

        summary.elapsed = started.elapsed();

        if let Some(store) = &self.store {
            store.save(&self.log)?;
            info!(
                path = %store.path().display(),
                entries = self.log.len(),
                "Prediction log saved"
            );
        }

        info!(
            ticks = summary.ticks,
            accepted = summary.accepted,
            rejected = summary.rejected,
            "Run complete"
        );

        Ok(summary)
    }

    /// Process one acquired frame and return the resulting display state.
    fn tick(
        &mut self,
        frame: &RawFrame,
        run_started: Instant,
        summary: &mut RunSummary,
    ) -> PipelineResult<DisplayState> {
        let features = self.extractor.extract(frame)?;
        if features.len() != self.config.feature_len {
            return Err(PipelineError::ShapeMismatch {
                expected: self.config.feature_len,
                actual: features.len(),
            });
        }

        metrics::record_frame();
        if self.window.push(features) {
            summary.frames_pushed += 1;
        } else {
            metrics::record_frame_skipped();
        }

        if !self.window.is_full() {
            return Ok(DisplayState::Accumulating);
        }

        let snapshot = self.window.snapshot();
        let decision = match self.classifier.infer(&snapshot) {
            Ok(distribution) => self.gate.evaluate(&distribution),
            Err(e) => Err(e),
        };

        match decision {
            Ok(GateDecision::Accepted {
                label, confidence, ..
            }) => {
                let prediction =
                    Prediction::new(run_started.elapsed().as_secs_f64(), &label, confidence);
                self.log.append(prediction);
                summary.accepted += 1;
                metrics::record_accepted(&label);
                Ok(DisplayState::Accepted { label, confidence })
            }
            Ok(GateDecision::Rejected { confidence }) => {
                summary.rejected += 1;
                metrics::record_rejected();
                Ok(DisplayState::Rejected { confidence })
            }
            Err(e) if e.is_inference_fault() => match self.config.inference_error_policy {
                InferenceErrorPolicy::RejectTick => {
                    warn!(error = %e, "Inference failed; rejecting tick");
                    summary.inference_errors += 1;
                    metrics::record_inference_error();
                    Ok(DisplayState::Rejected { confidence: 0.0 })
                }
                InferenceErrorPolicy::Abort => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    /// Predictions accepted so far, prior persisted entries included.
    pub fn log(&self) -> &PredictionLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use signstream_models::FeatureVector;
    use crate::replay::{RecordedExtractor, ReplaySource};
    use crate::store::PredictionLogStore;
    use signstream_models::RecordedSession;

    const FEATURE_LEN: usize = 4;

    fn test_config() -> PipelineConfig {
        PipelineConfig {
            window_len: 30,
            feature_len: FEATURE_LEN,
            confidence_threshold: 0.8,
            target_fps: None,
            ..Default::default()
        }
    }

    fn labels() -> LabelMap {
        LabelMap::from_pairs([("thanks", 0usize), ("hello", 1usize)]).unwrap()
    }

    fn detection_session(frames: usize) -> RecordedSession {
        RecordedSession {
            recorded_at: None,
            fps: None,
            frames: (0..frames)
                .map(|i| vec![0.9, 0.5, 0.5, i as f32])
                .collect(),
        }
    }

    /// Classifier that replays a fixed script of outcomes.
    struct ScriptedClassifier {
        script: Vec<PipelineResult<Vec<f32>>>,
        calls: usize,
    }

    impl ScriptedClassifier {
        fn returning(distribution: Vec<f32>) -> Self {
            Self {
                script: vec![Ok(distribution)],
                calls: 0,
            }
        }

        fn with_script(script: Vec<PipelineResult<Vec<f32>>>) -> Self {
            Self { script, calls: 0 }
        }
    }

    impl SequenceClassifier for ScriptedClassifier {
        fn infer(&mut self, window: &[FeatureVector]) -> PipelineResult<Vec<f32>> {
            assert!(!window.is_empty(), "classifier must see a non-empty window");
            let step = self.calls.min(self.script.len() - 1);
            self.calls += 1;
            match &self.script[step] {
                Ok(distribution) => Ok(distribution.clone()),
                Err(_) => Err(PipelineError::inference("scripted failure")),
            }
        }
    }

    /// Overlay that records every state it is shown.
    #[derive(Clone, Default)]
    struct RecordingOverlay {
        states: Rc<RefCell<Vec<DisplayState>>>,
    }

    impl OverlaySink for RecordingOverlay {
        fn show(&mut self, state: &DisplayState) {
            self.states.borrow_mut().push(state.clone());
        }
    }

    fn build_pipeline(
        frames: usize,
        classifier: ScriptedClassifier,
        overlay: RecordingOverlay,
    ) -> StreamPipeline {
        StreamPipelineBuilder::new(test_config())
            .with_label_map(labels())
            .with_source(Box::new(ReplaySource::new(detection_session(frames))))
            .with_extractor(Box::new(RecordedExtractor))
            .with_classifier(Box::new(classifier))
            .with_overlay(Box::new(overlay))
            .build()
            .unwrap()
    }

    #[test]
    fn test_end_to_end_accepted_prediction() {
        let overlay = RecordingOverlay::default();
        // "thanks" at 0.92 against threshold 0.8.
        let pipeline = build_pipeline(
            30,
            ScriptedClassifier::returning(vec![0.92, 0.05]),
            overlay.clone(),
        );

        let summary = pipeline.run().unwrap();
        assert_eq!(summary.ticks, 30);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.rejected, 0);

        let states = overlay.states.borrow();
        assert_eq!(states.len(), 30);
        assert!(states[..29]
            .iter()
            .all(|s| *s == DisplayState::Accumulating));
        match &states[29] {
            DisplayState::Accepted { label, confidence } => {
                assert_eq!(label, "thanks");
                assert!((confidence - f64::from(0.92f32)).abs() < 1e-9);
            }
            other => panic!("expected accepted state, got {other:?}"),
        }
    }

    #[test]
    fn test_below_threshold_is_rejected_and_unlogged() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("prediction_log.json"));
        let overlay = RecordingOverlay::default();

        let pipeline = StreamPipelineBuilder::new(test_config())
            .with_label_map(labels())
            .with_source(Box::new(ReplaySource::new(detection_session(30))))
            .with_extractor(Box::new(RecordedExtractor))
            .with_classifier(Box::new(ScriptedClassifier::returning(vec![0.5, 0.3])))
            .with_overlay(Box::new(overlay.clone()))
            .with_store(store.clone())
            .build()
            .unwrap();

        let summary = pipeline.run().unwrap();
        assert_eq!(summary.accepted, 0);
        assert_eq!(summary.rejected, 1);
        assert!(store.load().is_empty());
        assert!(matches!(
            overlay.states.borrow().last(),
            Some(DisplayState::Rejected { .. })
        ));
    }

    #[test]
    fn test_log_persisted_and_appended_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("prediction_log.json"));

        for expected_len in 1..=2u64 {
            let pipeline = StreamPipelineBuilder::new(test_config())
                .with_label_map(labels())
                .with_source(Box::new(ReplaySource::new(detection_session(30))))
                .with_extractor(Box::new(RecordedExtractor))
                .with_classifier(Box::new(ScriptedClassifier::with_script(vec![
                    Ok(vec![0.92, 0.05]),
                    Ok(vec![0.5, 0.3]),
                ])))
                .with_store(store.clone())
                .build()
                .unwrap();
            pipeline.run().unwrap();

            let log = store.load();
            assert_eq!(log.len() as u64, expected_len);
            assert_eq!(log.last().unwrap().label, "thanks");
        }
    }

    #[test]
    fn test_shape_mismatch_aborts_without_saving() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("prediction_log.json"));

        let mut session = detection_session(5);
        session.frames[3] = vec![0.9, 0.5]; // wrong length mid-stream

        let pipeline = StreamPipelineBuilder::new(test_config())
            .with_label_map(labels())
            .with_source(Box::new(ReplaySource::new(session)))
            .with_extractor(Box::new(RecordedExtractor))
            .with_classifier(Box::new(ScriptedClassifier::returning(vec![0.9, 0.1])))
            .with_store(store.clone())
            .build()
            .unwrap();

        let err = pipeline.run().unwrap_err();
        assert!(matches!(err, PipelineError::ShapeMismatch { .. }));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_inference_failure_reject_tick_continues() {
        let overlay = RecordingOverlay::default();
        // 31 frames: the window is full on ticks 30 and 31. First
        // evaluation fails, second accepts.
        let classifier = ScriptedClassifier::with_script(vec![
            Err(PipelineError::inference("scripted failure")),
            Ok(vec![0.05, 0.95]),
        ]);

        let pipeline = build_pipeline(31, classifier, overlay.clone());
        let summary = pipeline.run().unwrap();

        assert_eq!(summary.inference_errors, 1);
        assert_eq!(summary.accepted, 1);

        let states = overlay.states.borrow();
        assert!(matches!(states[29], DisplayState::Rejected { .. }));
        assert!(states[30].is_accepted());
    }

    #[test]
    fn test_inference_failure_abort_policy_ends_run() {
        let mut config = test_config();
        config.inference_error_policy = InferenceErrorPolicy::Abort;

        let pipeline = StreamPipelineBuilder::new(config)
            .with_label_map(labels())
            .with_source(Box::new(ReplaySource::new(detection_session(30))))
            .with_extractor(Box::new(RecordedExtractor))
            .with_classifier(Box::new(ScriptedClassifier::with_script(vec![Err(
                PipelineError::inference("scripted failure"),
            )])))
            .build()
            .unwrap();

        let err = pipeline.run().unwrap_err();
        assert!(err.is_inference_fault());
    }

    #[test]
    fn test_detection_only_policy_delays_evaluation() {
        let mut config = test_config();
        config.push_policy = signstream_models::PushPolicy::DetectionOnly;
        config.window_len = 3;

        // Two blank frames interleaved with three detections: only the
        // detections count toward the fill.
        let session = RecordedSession {
            recorded_at: None,
            fps: None,
            frames: vec![
                vec![0.9, 0.1, 0.1, 0.0],
                vec![0.0, 0.0, 0.0, 1.0],
                vec![0.9, 0.1, 0.1, 2.0],
                vec![0.0, 0.0, 0.0, 3.0],
                vec![0.9, 0.1, 0.1, 4.0],
            ],
        };

        let overlay = RecordingOverlay::default();
        let pipeline = StreamPipelineBuilder::new(config)
            .with_label_map(labels())
            .with_source(Box::new(ReplaySource::new(session)))
            .with_extractor(Box::new(RecordedExtractor))
            .with_classifier(Box::new(ScriptedClassifier::returning(vec![0.9, 0.05])))
            .with_overlay(Box::new(overlay.clone()))
            .build()
            .unwrap();

        let summary = pipeline.run().unwrap();
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.frames_pushed, 3);

        // Window fills on the last detection; earlier ticks accumulate.
        let states = overlay.states.borrow();
        assert!(states[..4].iter().all(|s| *s == DisplayState::Accumulating));
        assert!(states[4].is_accepted());
    }

    #[test]
    fn test_builder_requires_collaborators() {
        let err = StreamPipelineBuilder::new(test_config()).build().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn test_quit_signal_stops_loop_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("prediction_log.json"));
        let quit = crate::control::FlagQuit::new();
        quit.request_quit();

        let pipeline = StreamPipelineBuilder::new(test_config())
            .with_label_map(labels())
            .with_source(Box::new(ReplaySource::new(detection_session(30))))
            .with_extractor(Box::new(RecordedExtractor))
            .with_classifier(Box::new(ScriptedClassifier::returning(vec![0.9, 0.1])))
            .with_quit(Box::new(quit))
            .with_store(store.clone())
            .build()
            .unwrap();

        let summary = pipeline.run().unwrap();
        // Quit is checked at the end of the first tick.
        assert_eq!(summary.ticks, 1);
        assert!(store.path().exists());
    }
}

//! Real-time sign classification runner.
//!
//! Replays a recorded landmark session through the streaming pipeline
//! with an ONNX sequence classifier, then persists the prediction log.

mod config;

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use signstream_pipeline::{
    load_label_map, OnnxSequenceClassifier, PredictionLogStore, RecordedExtractor, ReplaySource,
    StreamPipelineBuilder,
};

use crate::config::RunnerConfig;

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("signstream=info".parse().unwrap())
        .add_directive("ort=warn".parse().unwrap())
        .add_directive("onnxruntime=warn".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting signstream-runner");

    if let Err(e) = run() {
        error!("Runner error: {e:#}");
        std::process::exit(1);
    }

    info!("Runner shutdown complete");
}

fn run() -> anyhow::Result<()> {
    let config = RunnerConfig::from_env();
    info!("Runner config: {:?}", config);

    // Install the Prometheus recorder before any pipeline metrics fire.
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", run_id = %run_id);
    let _guard = span.enter();

    let label_map =
        load_label_map(&config.label_map_path).context("Failed to load label map")?;

    let classifier =
        OnnxSequenceClassifier::load(&config.model_path, config.pipeline.feature_len)
            .context("Failed to load sequence classifier")?;

    let source = ReplaySource::from_path(&config.session_path)
        .context("Failed to load recorded session")?;

    let pipeline = StreamPipelineBuilder::new(config.pipeline.clone())
        .with_label_map(label_map)
        .with_source(Box::new(source))
        .with_extractor(Box::new(RecordedExtractor))
        .with_classifier(Box::new(classifier))
        .with_store(PredictionLogStore::new(&config.log_path))
        .build()
        .context("Failed to build pipeline")?;

    let summary = pipeline.run().context("Pipeline run failed")?;

    info!(
        ticks = summary.ticks,
        accepted = summary.accepted,
        rejected = summary.rejected,
        inference_errors = summary.inference_errors,
        elapsed_secs = format!("{:.2}", summary.elapsed.as_secs_f64()),
        "Session finished"
    );
    debug!(metrics = %metrics_handle.render(), "Final metrics");

    Ok(())
}

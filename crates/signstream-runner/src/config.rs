//! Runner configuration.

use std::path::PathBuf;
use std::str::FromStr;

use signstream_pipeline::PipelineConfig;

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Exported sequence model
    pub model_path: PathBuf,
    /// Persisted label map
    pub label_map_path: PathBuf,
    /// Recorded landmark session to replay
    pub session_path: PathBuf,
    /// Prediction log location
    pub log_path: PathBuf,
    /// Pipeline settings
    pub pipeline: PipelineConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.onnx"),
            label_map_path: PathBuf::from("label_map.json"),
            session_path: PathBuf::from("recorded_session.json"),
            log_path: PathBuf::from("prediction_log.json"),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = PipelineConfig::default();
        Self {
            model_path: env_path("SIGNSTREAM_MODEL", "model.onnx"),
            label_map_path: env_path("SIGNSTREAM_LABEL_MAP", "label_map.json"),
            session_path: env_path("SIGNSTREAM_SESSION", "recorded_session.json"),
            log_path: env_path("SIGNSTREAM_PREDICTION_LOG", "prediction_log.json"),
            pipeline: PipelineConfig {
                window_len: env_parse("SIGNSTREAM_WINDOW_LEN", defaults.window_len),
                feature_len: env_parse("SIGNSTREAM_FEATURE_LEN", defaults.feature_len),
                confidence_threshold: env_parse(
                    "SIGNSTREAM_CONFIDENCE_THRESHOLD",
                    defaults.confidence_threshold,
                ),
                target_fps: env_target_fps("SIGNSTREAM_TARGET_FPS", defaults.target_fps),
                push_policy: env_parse("SIGNSTREAM_PUSH_POLICY", defaults.push_policy),
                inference_error_policy: env_parse(
                    "SIGNSTREAM_INFERENCE_ERROR_POLICY",
                    defaults.inference_error_policy,
                ),
            },
        }
    }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// `none` or `0` disables pacing; an unparseable value keeps the default.
fn env_target_fps(key: &str, default: Option<f64>) -> Option<f64> {
    match std::env::var(key) {
        Err(_) => default,
        Ok(raw) if raw.eq_ignore_ascii_case("none") || raw.trim() == "0" => None,
        Ok(raw) => raw.parse::<f64>().ok().filter(|fps| *fps > 0.0).or(default),
    }
}

//! Prediction log persistence.
//!
//! The log is loaded once at startup and rewritten in full exactly once
//! at clean shutdown. A missing file at load is the normal first-run
//! path; an unreadable or unparseable file degrades to an empty log so a
//! damaged log never blocks a session. A crash mid-run loses everything
//! since the last save.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use signstream_models::PredictionLog;

use crate::error::{PipelineError, PipelineResult};

/// JSON-file store for the prediction log.
#[derive(Debug, Clone)]
pub struct PredictionLogStore {
    path: PathBuf,
}

impl PredictionLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted log, degrading to an empty one when the file is
    /// missing or damaged.
    pub fn load(&self) -> PredictionLog {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No prior prediction log; starting empty");
                return PredictionLog::new();
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read prediction log; starting empty"
                );
                return PredictionLog::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(log) => log,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Prediction log unparseable; starting empty"
                );
                PredictionLog::new()
            }
        }
    }

    /// Rewrite the whole log to disk, creating the parent directory if
    /// needed.
    pub fn save(&self, log: &PredictionLog) -> PipelineResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PipelineError::Persistence {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(log)?;
        fs::write(&self.path, json).map_err(|e| PipelineError::Persistence {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signstream_models::Prediction;

    #[test]
    fn test_round_trip_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("prediction_log.json"));

        let mut log = PredictionLog::new();
        log.append(Prediction::new(1.0, "hello", 0.91));
        log.append(Prediction::new(2.5, "thanks", 0.86));
        log.append(Prediction::new(4.0, "hello", 0.99));
        store.save(&log).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, log);
        let labels: Vec<&str> = loaded.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["hello", "thanks", "hello"]);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prediction_log.json");
        fs::write(&path, "{ not json").unwrap();

        let store = PredictionLogStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_overwrites_prior_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("prediction_log.json"));

        let mut first = PredictionLog::new();
        first.append(Prediction::new(1.0, "hello", 0.9));
        first.append(Prediction::new(2.0, "thanks", 0.9));
        store.save(&first).unwrap();

        let mut second = PredictionLog::new();
        second.append(Prediction::new(3.0, "yes", 0.95));
        store.save(&second).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.last().unwrap().label, "yes");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = PredictionLogStore::new(dir.path().join("logs").join("prediction_log.json"));
        store.save(&PredictionLog::new()).unwrap();
        assert!(store.path().exists());
    }
}

//! Accepted predictions and the append-only prediction log.

use serde::{Deserialize, Serialize};

/// One accepted classification result.
///
/// `timestamp` is seconds since the run started, rounded to two decimals;
/// `confidence` is the classifier probability for the winning label,
/// rounded to three. The field names are the on-disk record format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub timestamp: f64,
    pub label: String,
    pub confidence: f64,
}

impl Prediction {
    pub fn new(elapsed_secs: f64, label: impl Into<String>, confidence: f64) -> Self {
        Self {
            timestamp: round_to(elapsed_secs, 2),
            label: label.into(),
            confidence: round_to(confidence, 3),
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Ordered, append-only log of accepted predictions.
///
/// Serializes transparently as a bare JSON array so the persisted file
/// stays a plain list of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionLog {
    entries: Vec<Prediction>,
}

impl PredictionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one prediction. Entries are never mutated or reordered.
    pub fn append(&mut self, prediction: Prediction) {
        self.entries.push(prediction);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prediction> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Prediction> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_rounding() {
        let p = Prediction::new(12.3456, "hello", 0.92345);
        assert_eq!(p.timestamp, 12.35);
        assert_eq!(p.confidence, 0.923);
    }

    #[test]
    fn test_log_appends_in_order() {
        let mut log = PredictionLog::new();
        log.append(Prediction::new(1.0, "hello", 0.9));
        log.append(Prediction::new(2.0, "thanks", 0.85));

        assert_eq!(log.len(), 2);
        let labels: Vec<&str> = log.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["hello", "thanks"]);
        assert_eq!(log.last().unwrap().label, "thanks");
    }

    #[test]
    fn test_log_serializes_as_array() {
        let mut log = PredictionLog::new();
        log.append(Prediction::new(0.5, "hello", 0.91));

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.starts_with('['));

        let back: PredictionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}

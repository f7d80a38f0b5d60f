//! Class-index to label resolution.
//!
//! The persisted label map keeps the training orientation
//! (`{"label": index}`); it is inverted once at load and never mutated
//! during a run.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading a label map.
#[derive(Debug, Error)]
pub enum LabelMapError {
    #[error("invalid label map JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate class index {0} in label map")]
    DuplicateIndex(usize),
}

/// Immutable mapping of classifier output index to human-readable label.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LabelMap {
    by_index: HashMap<usize, String>,
}

impl LabelMap {
    /// Build from `(label, index)` pairs, rejecting duplicate indices.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, LabelMapError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut by_index = HashMap::new();
        for (label, index) in pairs {
            if by_index.insert(index, label.into()).is_some() {
                return Err(LabelMapError::DuplicateIndex(index));
            }
        }
        Ok(Self { by_index })
    }

    /// Parse the persisted `{"label": index}` form.
    pub fn from_json_str(json: &str) -> Result<Self, LabelMapError> {
        let name_to_index: HashMap<String, usize> = serde_json::from_str(json)?;
        Self::from_pairs(name_to_index)
    }

    /// Resolve a classifier output index to its label.
    pub fn resolve(&self, index: usize) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    /// Number of known classes.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

//! Label map loading.

use std::fs;
use std::path::Path;

use tracing::info;

use signstream_models::LabelMap;

use crate::error::{PipelineError, PipelineResult};

/// Load the persisted `{"label": index}` map, fixed for the run.
pub fn load_label_map(path: &Path) -> PipelineResult<LabelMap> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::LabelMapLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let map = LabelMap::from_json_str(&text).map_err(|e| PipelineError::LabelMapLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    info!(path = %path.display(), classes = map.len(), "Label map loaded");
    Ok(map)
}

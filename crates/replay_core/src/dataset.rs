//! Dataset reference lookups.
//!
//! `<datapath>/code/dataset_info.json` carries per-level and per-subject
//! reference values maintained by hand alongside the dataset. The file is
//! small and assumed immutable during a run; lookups re-read it rather
//! than caching.

use crate::error::{CoreError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Contents of `dataset_info.json`. Unknown top-level keys are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetInfo {
    /// Level identifier → maximum reachable X position.
    #[serde(rename = "Maximum X position")]
    pub maximum_x_position: HashMap<String, f64>,
    /// Subject identifier → first-training epoch timestamp (seconds).
    #[serde(rename = "Training start timestamp")]
    pub training_start_timestamp: HashMap<String, f64>,
}

impl DatasetInfo {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let info: DatasetInfo = serde_json::from_str(&data)?;
        Ok(info)
    }
}

/// Maximum X position for a level, read fresh from the info file.
pub fn max_position(level: &str, dataset_info_path: &Path) -> Result<f64> {
    let info = DatasetInfo::load(dataset_info_path)?;
    info.maximum_x_position
        .get(level)
        .copied()
        .ok_or_else(|| CoreError::UnknownLevel { level: level.to_string() })
}

/// First-training epoch timestamp for a subject, read fresh from the info file.
pub fn training_start(subject: &str, dataset_info_path: &Path) -> Result<f64> {
    let info = DatasetInfo::load(dataset_info_path)?;
    info.training_start_timestamp
        .get(subject)
        .copied()
        .ok_or_else(|| CoreError::UnknownSubject { subject: subject.to_string() })
}

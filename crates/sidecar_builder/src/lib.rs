//! Sidecar Builder Library
//!
//! Batch pipeline over a dataset tree: discover replay files, derive
//! summary fields from each replay, and merge them into the companion JSON
//! sidecar. Files already carrying the `Cleared` key are skipped, so the
//! run is idempotent. One file's failure never aborts the run; outcomes
//! are collected into a run summary.

use anyhow::{Context, Result};
use replay_core::{dataset, metrics, summarize, ExtractOptions, ReplayExtractor, TrialId};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Replay file extension.
pub const REPLAY_EXTENSION: &str = "bk2";

/// Sidecar file extension (same stem as the replay).
pub const SIDECAR_EXTENSION: &str = "json";

/// Replays live exactly this many directory levels below the dataset root
/// (`<root>/<subject>/<session>/<modality>/<file>.bk2`).
pub const REPLAY_DEPTH: usize = 4;

/// Dataset info file, relative to the dataset root.
pub const DATASET_INFO_RELPATH: &str = "code/dataset_info.json";

/// Sidecar key whose presence marks a trial as already processed.
pub const PROCESSED_MARKER_KEY: &str = "Cleared";

/// Pre-existing sidecar field consumed for the training-day count.
pub const LEVEL_START_KEY: &str = "LevelStartTimestamp";

/// What happened to one replay file during a run.
#[derive(Debug)]
pub enum FileStatus {
    /// Sidecar fields derived and written.
    Processed,
    /// Sidecar already carried the processed marker; file untouched.
    Skipped,
    Failed(anyhow::Error),
}

#[derive(Debug)]
pub struct FileOutcome {
    pub replay: PathBuf,
    pub status: FileStatus,
}

/// Aggregated outcomes of one batch run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn processed(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o.status, FileStatus::Processed)).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o.status, FileStatus::Skipped)).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o.status, FileStatus::Failed(_))).count()
    }

    /// Failures with their paths, in processing order.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &anyhow::Error)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            FileStatus::Failed(err) => Some((o.replay.as_path(), err)),
            _ => None,
        })
    }
}

/// Enumerate replay files exactly `REPLAY_DEPTH` levels below `root`,
/// lexicographically sorted for a deterministic processing order.
pub fn find_replay_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).min_depth(REPLAY_DEPTH).max_depth(REPLAY_DEPTH) {
        let entry =
            entry.with_context(|| format!("Failed to scan dataset root {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) == Some(REPLAY_EXTENSION) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Companion sidecar path for a replay file (same stem, `.json`).
pub fn sidecar_path(replay: &Path) -> PathBuf {
    replay.with_extension(SIDECAR_EXTENSION)
}

fn load_sidecar(path: &Path) -> Result<Map<String, Value>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sidecar {}", path.display()))?;
    let map: Map<String, Value> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse sidecar {}", path.display()))?;
    Ok(map)
}

fn save_sidecar(path: &Path, sidecar: &Map<String, Value>) -> Result<()> {
    let data = serde_json::to_string_pretty(sidecar)?;
    fs::write(path, data).with_context(|| format!("Failed to write sidecar {}", path.display()))?;
    Ok(())
}

/// Process one replay file: derive the summary fields and merge them into
/// its sidecar. Returns `Skipped` without touching the file when the
/// sidecar already carries the processed marker.
pub fn process_replay(
    replay: &Path,
    dataset_info_path: &Path,
    extractor: &dyn ReplayExtractor,
    options: &ExtractOptions,
) -> Result<FileStatus> {
    let sidecar_file = sidecar_path(replay);
    let mut sidecar = load_sidecar(&sidecar_file)?;

    if sidecar.contains_key(PROCESSED_MARKER_KEY) {
        return Ok(FileStatus::Skipped);
    }

    println!("Processing {}", replay.display());

    let trial = TrialId::from_replay_path(replay)?;

    // The training-day count needs the trial's start time from the
    // original sidecar; check it before paying for the emulator replay.
    let level_start = sidecar
        .get(LEVEL_START_KEY)
        .and_then(Value::as_f64)
        .ok_or(replay_core::CoreError::MissingSidecarField { key: LEVEL_START_KEY })?;

    let vars = extractor.extract(replay, options)?;

    let max_position = dataset::max_position(&trial.level, dataset_info_path)?;
    let summary = summarize(&trial, &vars, max_position)?;

    let training_start = dataset::training_start(&trial.subject, dataset_info_path)?;
    let days_of_training = metrics::days_of_training(level_start, training_start);

    // Merge, overwriting on key collision.
    if let Value::Object(fields) = serde_json::to_value(&summary)? {
        sidecar.extend(fields);
    }
    sidecar.insert("DaysOfTraining".to_string(), Value::from(days_of_training));

    save_sidecar(&sidecar_file, &sidecar)?;
    Ok(FileStatus::Processed)
}

/// Run the populator over a dataset root.
///
/// Every discovered replay yields one outcome; failures are recorded and
/// the loop continues with the next file.
pub fn run(
    datapath: &Path,
    extractor: &dyn ReplayExtractor,
    options: &ExtractOptions,
) -> Result<RunSummary> {
    let dataset_info_path = datapath.join(DATASET_INFO_RELPATH);
    let replay_files = find_replay_files(datapath)?;
    log::debug!("found {} replay files under {}", replay_files.len(), datapath.display());

    let mut summary = RunSummary::default();
    for replay in replay_files {
        let status = match process_replay(&replay, &dataset_info_path, extractor, options) {
            Ok(status) => status,
            Err(err) => {
                log::error!("{}: {:#}", replay.display(), err);
                FileStatus::Failed(err)
            }
        };
        summary.outcomes.push(FileOutcome { replay, status });
    }

    Ok(summary)
}

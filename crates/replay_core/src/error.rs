use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed replay name {name:?}: {reason}")]
    MalformedReplayName { name: String, reason: String },

    #[error("No maximum X position recorded for level {level:?}")]
    UnknownLevel { level: String },

    #[error("No training start timestamp recorded for subject {subject:?}")]
    UnknownSubject { subject: String },

    #[error("Replay series {series:?} is empty")]
    EmptySeries { series: &'static str },

    #[error("Sidecar is missing the {key:?} field")]
    MissingSidecarField { key: &'static str },

    #[error("Extractor failed on {path}: {reason}")]
    ExtractorFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;

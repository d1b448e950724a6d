//! Structured trial identifier parsed from replay filenames.
//!
//! Replay files follow the dataset naming contract
//! `<subject>_<session>_<task>_<level>[_...].bk2`. The subject, session and
//! level segments are the identity of a trial; the parser validates the
//! shape up front instead of indexing into split results blindly.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Segment positions within the underscore-delimited file stem.
const SUBJECT_SEGMENT: usize = 0;
const SESSION_SEGMENT: usize = 1;
const LEVEL_SEGMENT: usize = 3;

/// Minimum number of segments a valid replay stem must carry.
const MIN_SEGMENTS: usize = 4;

/// Identity of one recorded trial: who played, in which session, which level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialId {
    pub subject: String,
    pub session: String,
    pub level: String,
}

impl TrialId {
    /// Parse a trial identifier from a replay file path.
    ///
    /// Only the final path segment matters; the extension is stripped
    /// before splitting on `_`. Malformed names fail with a descriptive
    /// error rather than silently misindexing.
    pub fn from_replay_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CoreError::MalformedReplayName {
                name: path.display().to_string(),
                reason: "path has no valid UTF-8 file name".to_string(),
            })?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name);

        let segments: Vec<&str> = stem.split('_').collect();
        if segments.len() < MIN_SEGMENTS {
            return Err(CoreError::MalformedReplayName {
                name: name.to_string(),
                reason: format!(
                    "expected at least {} underscore-delimited segments, found {}",
                    MIN_SEGMENTS,
                    segments.len()
                ),
            });
        }

        let pick = |index: usize, what: &str| -> Result<String> {
            let segment = segments[index];
            if segment.is_empty() {
                Err(CoreError::MalformedReplayName {
                    name: name.to_string(),
                    reason: format!("{} segment (index {}) is empty", what, index),
                })
            } else {
                Ok(segment.to_string())
            }
        };

        Ok(Self {
            subject: pick(SUBJECT_SEGMENT, "subject")?,
            session: pick(SESSION_SEGMENT, "session")?,
            level: pick(LEVEL_SEGMENT, "level")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_standard_replay_name() {
        let path = PathBuf::from("data/sub-01/ses-001/gamelogs/sub-01_ses-001_task-game_level-1.bk2");
        let trial = TrialId::from_replay_path(&path).unwrap();

        assert_eq!(trial.subject, "sub-01");
        assert_eq!(trial.session, "ses-001");
        assert_eq!(trial.level, "level-1");
    }

    #[test]
    fn test_parse_name_with_trailing_segments() {
        let path = PathBuf::from("sub-02_ses-010_task-game_level-4_rep-03.bk2");
        let trial = TrialId::from_replay_path(&path).unwrap();

        assert_eq!(trial.subject, "sub-02");
        assert_eq!(trial.session, "ses-010");
        assert_eq!(trial.level, "level-4");
    }

    #[test]
    fn test_too_few_segments_is_an_error() {
        let path = PathBuf::from("sub-01_ses-001.bk2");
        let err = TrialId::from_replay_path(&path).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("sub-01_ses-001.bk2"), "error should name the file: {}", msg);
        assert!(msg.contains("segments"), "error should describe the shape: {}", msg);
    }

    #[test]
    fn test_empty_segment_is_an_error() {
        let path = PathBuf::from("sub-01__task-game_level-1.bk2");
        let err = TrialId::from_replay_path(&path).unwrap_err();
        assert!(err.to_string().contains("session"), "got: {}", err);
    }
}

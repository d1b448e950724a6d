//! Per-trial summary record.
//!
//! The fixed set of derived fields merged into a trial's JSON sidecar.
//! Serialized key names are the dataset's sidecar vocabulary and must not
//! drift.

use crate::error::Result;
use crate::metrics;
use crate::replay::ReplayVariables;
use crate::trial::TrialId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    #[serde(rename = "SubjectID")]
    pub subject_id: String,
    #[serde(rename = "SessionID")]
    pub session_id: String,
    #[serde(rename = "Level")]
    pub level: String,
    #[serde(rename = "Cleared")]
    pub cleared: bool,
    #[serde(rename = "Duration")]
    pub duration: f64,
    #[serde(rename = "FinalScore")]
    pub final_score: i64,
    #[serde(rename = "TotalHealthLost")]
    pub total_health_lost: i64,
    #[serde(rename = "PercentComplete")]
    pub percent_complete: f64,
    #[serde(rename = "FakeRep")]
    pub fake_rep: bool,
}

/// Derive the summary fields for one trial.
///
/// `max_position` is the level's maximum X position from the dataset info.
pub fn summarize(
    trial: &TrialId,
    vars: &ReplayVariables,
    max_position: f64,
) -> Result<TrialSummary> {
    let final_score = metrics::final_score(&vars.score)?;

    Ok(TrialSummary {
        subject_id: trial.subject.clone(),
        session_id: trial.session.clone(),
        level: trial.level.clone(),
        cleared: metrics::cleared(&vars.lives),
        duration: metrics::duration_seconds(vars.x_player.len()),
        final_score,
        total_health_lost: metrics::total_health_lost(&vars.health),
        percent_complete: metrics::percent_complete(&vars.x_player, max_position)?,
        fake_rep: metrics::fake_rep(final_score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vars() -> ReplayVariables {
        ReplayVariables {
            x_player: (0..600).map(|i| i as f64).collect(),
            lives: vec![3; 600],
            health: vec![100; 600],
            score: vec![0, 50, 120],
            filename: "sub-01_ses-001_task-game_level-1.bk2".to_string(),
        }
    }

    fn sample_trial() -> TrialId {
        TrialId {
            subject: "sub-01".to_string(),
            session: "ses-001".to_string(),
            level: "level-1".to_string(),
        }
    }

    #[test]
    fn test_summarize_sample_trial() {
        let summary = summarize(&sample_trial(), &sample_vars(), 3000.0).unwrap();

        assert_eq!(summary.subject_id, "sub-01");
        assert_eq!(summary.session_id, "ses-001");
        assert_eq!(summary.level, "level-1");
        assert!(summary.cleared);
        assert_eq!(summary.duration, 10.0);
        assert_eq!(summary.final_score, 120);
        assert_eq!(summary.total_health_lost, 0);
        assert!(summary.fake_rep, "score 120 is below the fake-rep threshold");
        // Last X is 599 of an effective 2700.
        assert!((summary.percent_complete - 599.0 / 2700.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_serializes_with_sidecar_key_names() {
        let summary = summarize(&sample_trial(), &sample_vars(), 3000.0).unwrap();
        let value = serde_json::to_value(&summary).unwrap();

        for key in [
            "SubjectID",
            "SessionID",
            "Level",
            "Cleared",
            "Duration",
            "FinalScore",
            "TotalHealthLost",
            "PercentComplete",
            "FakeRep",
        ] {
            assert!(value.get(key).is_some(), "missing sidecar key {}", key);
        }
    }

    #[test]
    fn test_summarize_empty_score_fails() {
        let mut vars = sample_vars();
        vars.score.clear();
        assert!(summarize(&sample_trial(), &vars, 3000.0).is_err());
    }
}

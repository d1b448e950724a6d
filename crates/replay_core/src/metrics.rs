//! Derived gameplay metrics.
//!
//! Pure functions over the per-frame series of one replay. Each metric
//! feeds one sidecar field; thresholds are dataset conventions and must
//! not be reinterpreted.

use crate::error::{CoreError, Result};
use crate::replay::position::fix_position_resets;
use chrono::{DateTime, Utc};

/// Emulated frames per second.
pub const FRAME_RATE: f64 = 60.0;

/// Distance before the level's maximum X position at which the level
/// counts as complete.
pub const END_OF_LEVEL_BUFFER: f64 = 300.0;

/// Final scores below this mark a degenerate or placeholder replay.
pub const FAKE_REP_SCORE_THRESHOLD: i64 = 200;

/// A level is cleared when the lives counter never decreased.
pub fn cleared(lives: &[i64]) -> bool {
    lives.windows(2).all(|pair| pair[1] >= pair[0])
}

/// Wall-clock duration of the replay in seconds.
pub fn duration_seconds(frame_count: usize) -> f64 {
    frame_count as f64 / FRAME_RATE
}

/// Score on the last recorded frame.
pub fn final_score(score: &[i64]) -> Result<i64> {
    score.last().copied().ok_or(CoreError::EmptySeries { series: "score" })
}

/// Number of single-point health losses over the replay.
///
/// The game decrements health by exactly one per hit; other deltas are
/// refills or level transitions and do not count.
pub fn total_health_lost(health: &[i64]) -> i64 {
    health.windows(2).filter(|pair| pair[1] - pair[0] == -1).count() as i64
}

/// Percentage of the level covered, based on the reset-corrected final X
/// position relative to the level's effective end.
pub fn percent_complete(x_player: &[f64], max_position: f64) -> Result<f64> {
    let corrected = fix_position_resets(x_player);
    let last = corrected
        .last()
        .copied()
        .ok_or(CoreError::EmptySeries { series: "X_player" })?;

    let end_of_level = max_position - END_OF_LEVEL_BUFFER;
    Ok(last / end_of_level * 100.0)
}

/// Whether a final score marks the replay as degenerate.
pub fn fake_rep(final_score: i64) -> bool {
    final_score < FAKE_REP_SCORE_THRESHOLD
}

/// Whole days between the subject's first training session and this
/// trial's start, counting the first day as day 1.
pub fn days_of_training(level_start_ts: f64, training_start_ts: f64) -> i64 {
    let current = timestamp_to_datetime(level_start_ts);
    let first = timestamp_to_datetime(training_start_ts);
    (current - first).num_days() + 1
}

fn timestamp_to_datetime(epoch_seconds: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch_seconds.trunc() as i64, 0)
        .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
}

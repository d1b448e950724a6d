//! Position-reset correction.
//!
//! The game reports the player X coordinate relative to the current scroll
//! section, so crossing a section boundary snaps the value back toward
//! zero. A raw frame-to-frame drop larger than any possible backward
//! movement is such a reset, not actual movement.

/// Largest one-frame backward movement the player can actually perform.
/// Drops beyond this are scroll-boundary resets.
pub const RESET_JUMP_THRESHOLD: f64 = 50.0;

/// Remove spurious resets from a player X series.
///
/// Each detected reset adds the lost distance to a running offset applied
/// to every subsequent sample, so the corrected series is continuous and
/// its last value reflects total forward progress. Genuine small backward
/// movement passes through untouched.
pub fn fix_position_resets(x_player: &[f64]) -> Vec<f64> {
    let mut corrected = Vec::with_capacity(x_player.len());
    let mut offset = 0.0;

    for (i, &x) in x_player.iter().enumerate() {
        if i > 0 {
            let delta = x - x_player[i - 1];
            if delta < -RESET_JUMP_THRESHOLD {
                offset += x_player[i - 1] - x;
            }
        }
        corrected.push(x + offset);
    }

    corrected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotone_series_unchanged() {
        let x = vec![0.0, 10.0, 25.0, 40.0];
        assert_eq!(fix_position_resets(&x), x);
    }

    #[test]
    fn test_small_backward_movement_unchanged() {
        // Player walks back a few pixels: legitimate, not a reset.
        let x = vec![100.0, 95.0, 98.0];
        assert_eq!(fix_position_resets(&x), x);
    }

    #[test]
    fn test_single_reset_made_continuous() {
        // Scroll boundary: 400 → 10 is a reset of 390.
        let x = vec![350.0, 400.0, 10.0, 60.0];
        let fixed = fix_position_resets(&x);

        assert_eq!(fixed, vec![350.0, 400.0, 400.0, 450.0]);
        // No corrected delta should look like a reset anymore.
        for pair in fixed.windows(2) {
            assert!(pair[1] - pair[0] > -RESET_JUMP_THRESHOLD);
        }
    }

    #[test]
    fn test_two_resets_accumulate() {
        let x = vec![200.0, 5.0, 105.0, 10.0, 30.0];
        let fixed = fix_position_resets(&x);

        // 195 lost at the first reset, 95 at the second.
        assert_eq!(fixed, vec![200.0, 200.0, 300.0, 300.0, 320.0]);
    }

    #[test]
    fn test_empty_series() {
        assert!(fix_position_resets(&[]).is_empty());
    }
}

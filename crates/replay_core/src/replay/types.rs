use serde::{Deserialize, Serialize};

/// Per-frame gameplay variables recovered from one replay.
///
/// Field names on the wire follow the extractor's output format
/// (`X_player` keeps its historical capitalization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayVariables {
    /// Player X position per emulated frame.
    #[serde(rename = "X_player")]
    pub x_player: Vec<f64>,
    /// Remaining lives per frame.
    pub lives: Vec<i64>,
    /// Health value per frame.
    pub health: Vec<i64>,
    /// Score per frame.
    pub score: Vec<i64>,
    /// Path of the source replay file.
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let json = r#"{
            "X_player": [0.0, 12.5],
            "lives": [3, 3],
            "health": [100, 99],
            "score": [0, 50],
            "filename": "sub-01_ses-001_task-game_level-1.bk2"
        }"#;

        let vars: ReplayVariables = serde_json::from_str(json).unwrap();
        assert_eq!(vars.x_player, vec![0.0, 12.5]);
        assert_eq!(vars.score.last(), Some(&50));

        let back = serde_json::to_value(&vars).unwrap();
        assert!(back.get("X_player").is_some(), "capitalized wire name must round-trip");
    }
}

//! Extractor seam.
//!
//! Replaying a `.bk2` input log requires the emulator, which runs out of
//! process. The trait keeps the pipeline testable; `ProcessExtractor` is
//! the production implementation and shells out to the extraction command,
//! reading the replay variables as JSON from its stdout.

use crate::error::{CoreError, Result};
use crate::replay::types::ReplayVariables;
use std::path::Path;
use std::process::Command;

/// Game identifier handed to the emulator's integration lookup.
pub const GAME_ID: &str = "ShinobiIIIReturnOfTheNinjaMaster-Genesis";

/// Extraction command looked up on PATH unless overridden.
pub const DEFAULT_EXTRACT_CMD: &str = "replay-extract";

/// Environment variable overriding the extraction command.
pub const EXTRACT_CMD_ENV: &str = "REPLAY_EXTRACT_CMD";

/// Which emulator integration set resolves the game's memory addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationProfile {
    Stable,
    Experimental,
    All,
}

impl IntegrationProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationProfile::Stable => "stable",
            IntegrationProfile::Experimental => "experimental",
            IntegrationProfile::All => "all",
        }
    }
}

/// Options forwarded to the extractor for one replay.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Drop the first emulated step (the frame before inputs apply).
    pub skip_first_step: bool,
    /// Render a GIF of the replay next to the source file.
    pub save_gif: bool,
    /// Emulator game identifier.
    pub game: String,
    pub integration: IntegrationProfile,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            skip_first_step: true,
            save_gif: true,
            game: GAME_ID.to_string(),
            integration: IntegrationProfile::Stable,
        }
    }
}

/// Anything that can turn a replay file into per-frame variables.
pub trait ReplayExtractor {
    fn extract(&self, replay_path: &Path, options: &ExtractOptions) -> Result<ReplayVariables>;
}

/// Production extractor: spawns the external extraction command.
#[derive(Debug, Clone)]
pub struct ProcessExtractor {
    command: String,
}

impl ProcessExtractor {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }

    /// Resolve the command from the environment, falling back to the
    /// default name on PATH.
    pub fn from_env() -> Self {
        let command = std::env::var(EXTRACT_CMD_ENV)
            .unwrap_or_else(|_| DEFAULT_EXTRACT_CMD.to_string());
        Self { command }
    }

    /// CLI arguments for one extraction, replay path last.
    fn build_args(options: &ExtractOptions, replay_path: &Path) -> Vec<String> {
        let mut args = Vec::new();
        if options.skip_first_step {
            args.push("--skip-first-step".to_string());
        }
        if options.save_gif {
            args.push("--save-gif".to_string());
        }
        args.push("--game".to_string());
        args.push(options.game.clone());
        args.push("--inttype".to_string());
        args.push(options.integration.as_str().to_string());
        args.push(replay_path.display().to_string());
        args
    }
}

impl ReplayExtractor for ProcessExtractor {
    fn extract(&self, replay_path: &Path, options: &ExtractOptions) -> Result<ReplayVariables> {
        let args = Self::build_args(options, replay_path);
        log::debug!("running {} {}", self.command, args.join(" "));

        let output = Command::new(&self.command).args(&args).output().map_err(|e| {
            CoreError::ExtractorFailed {
                path: replay_path.to_path_buf(),
                reason: format!("failed to spawn {:?}: {}", self.command, e),
            }
        })?;

        if !output.status.success() {
            return Err(CoreError::ExtractorFailed {
                path: replay_path.to_path_buf(),
                reason: format!(
                    "{:?} exited with {}: {}",
                    self.command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| CoreError::ExtractorFailed {
            path: replay_path.to_path_buf(),
            reason: format!("unparseable extractor output: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_options_match_dataset_convention() {
        let opts = ExtractOptions::default();
        assert!(opts.skip_first_step);
        assert!(opts.save_gif);
        assert_eq!(opts.game, GAME_ID);
        assert_eq!(opts.integration, IntegrationProfile::Stable);
    }

    #[test]
    fn test_build_args_order_and_flags() {
        let opts = ExtractOptions::default();
        let path = PathBuf::from("sub-01_ses-001_task-game_level-1.bk2");
        let args = ProcessExtractor::build_args(&opts, &path);

        assert_eq!(
            args,
            vec![
                "--skip-first-step",
                "--save-gif",
                "--game",
                GAME_ID,
                "--inttype",
                "stable",
                "sub-01_ses-001_task-game_level-1.bk2",
            ]
        );
    }

    #[test]
    fn test_build_args_omits_disabled_flags() {
        let opts = ExtractOptions {
            skip_first_step: false,
            save_gif: false,
            ..ExtractOptions::default()
        };
        let args = ProcessExtractor::build_args(&opts, Path::new("r.bk2"));
        assert!(!args.contains(&"--skip-first-step".to_string()));
        assert!(!args.contains(&"--save-gif".to_string()));
    }

    #[test]
    fn test_missing_command_is_an_extractor_error() {
        let extractor = ProcessExtractor::new("definitely-not-a-real-command-0xbk2");
        let err = extractor
            .extract(Path::new("r.bk2"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::ExtractorFailed { .. }));
    }
}

//! Replay extraction: per-frame gameplay variables recovered by replaying a
//! controller-input log through the emulator, plus the position-reset
//! correction applied before completion metrics are computed.

pub mod extractor;
pub mod position;
pub mod types;

pub use extractor::{ExtractOptions, IntegrationProfile, ProcessExtractor, ReplayExtractor};
pub use position::fix_position_resets;
pub use types::ReplayVariables;

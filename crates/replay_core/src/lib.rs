//! # replay_core - Gameplay Replay Metrics Library
//!
//! Domain library for annotating a behavioral game dataset: parsing trial
//! identifiers from replay filenames, extracting per-frame gameplay
//! variables through an emulator-backed extractor, correcting position
//! resets, and deriving the summary statistics written into each trial's
//! JSON sidecar.

pub mod dataset;
pub mod error;
pub mod metrics;
pub mod replay;
pub mod summary;
pub mod trial;

pub use dataset::DatasetInfo;
pub use error::{CoreError, Result};
pub use replay::{
    fix_position_resets, ExtractOptions, IntegrationProfile, ProcessExtractor, ReplayExtractor,
    ReplayVariables,
};
pub use summary::{summarize, TrialSummary};
pub use trial::TrialId;

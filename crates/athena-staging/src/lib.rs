//! Optional FTP staging for downloaded media.
//!
//! Staging relocates a downloaded video to a remote host so the primary
//! host's disk and memory stay free between download and inference
//! submission. The adapter is strictly best-effort: every operation reports
//! failure as an absence/boolean signal and never raises past its boundary,
//! so callers fall back to the local copy.

pub mod client;
pub mod config;
pub mod reference;

pub use client::StagingClient;
pub use config::StagingConfig;
pub use reference::StagedMediaReference;

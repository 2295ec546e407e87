//! Video download using yt-dlp.
//!
//! This crate fetches social-media videos for the analysis pipeline:
//! - platform classification with per-platform strategy fallback
//! - self-reference rejection before any tool invocation
//! - payload size enforcement with cleanup on violation
//! - ANSI-stripped tool diagnostics

pub mod artifact;
pub mod error;
pub mod fetch;
pub mod platform;
pub mod sanitize;
pub mod strategy;

pub use artifact::LocalMediaArtifact;
pub use error::{MediaError, MediaResult};
pub use fetch::fetch;
pub use platform::{is_self_reference, Platform};
pub use sanitize::strip_ansi_codes;
pub use strategy::{strategies_for, DownloadStrategy};

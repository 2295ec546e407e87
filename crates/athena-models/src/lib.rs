//! Shared data models for the Athena script backend.
//!
//! This crate provides Serde-serializable types for:
//! - Script generation modes
//! - Analyze and translate request/response DTOs
//! - Collision-free artifact naming

pub mod api;
pub mod mode;
pub mod naming;

pub use api::{AnalyzeRequest, AnalyzeResponse, TranslateRequest, TranslateResponse};
pub use mode::ScriptMode;
pub use naming::unique_video_filename;

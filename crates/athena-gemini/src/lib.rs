//! Gemini integration for the Athena script backend.
//!
//! This crate owns the full inference leg of the pipeline:
//! - a reqwest client for the Gemini files and generation APIs
//! - the submission manager (upload, fixed-interval state polling, cleanup)
//! - startup model selection with per-call substitution
//! - generation with rate-limit retry and backoff
//! - the single classification point for Gemini's informal error texts

pub mod classify;
pub mod client;
pub mod error;
pub mod generate;
pub mod model;
pub mod prompt;
pub mod submit;

pub use classify::{classify, ErrorKind};
pub use client::{FileState, GeminiClient, ModelInfo, Part, RemoteFile};
pub use error::{truncate_diagnostic, GeminiError, GeminiResult};
pub use generate::{generate_with_retry, RetryPolicy, EMPTY_RESULT_PLACEHOLDER};
pub use model::{choose_model, resolve_model, DEFAULT_MODEL};
pub use prompt::{script_prompt, translate_prompt};
pub use submit::{submit, PollConfig, UploadedArtifact};

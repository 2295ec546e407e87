//! Gemini error types.

use thiserror::Error;

pub type GeminiResult<T> = Result<T, GeminiError>;

/// Diagnostic texts surfaced to users are truncated to this many characters.
const MAX_DIAGNOSTIC_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// Non-success HTTP response from the Gemini API, pre-classification.
    #[error("Gemini API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("File rejected by service: {0}")]
    RejectedByService(String),

    #[error("Processing timed out after {waited_secs}s")]
    ProcessingTimeout { waited_secs: u64 },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeminiError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::RejectedByService(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }
}

/// Truncate a remote diagnostic so internals do not leak wholesale into
/// user-facing messages. Operates on char boundaries.
pub fn truncate_diagnostic(text: &str) -> String {
    if text.chars().count() <= MAX_DIAGNOSTIC_CHARS {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(MAX_DIAGNOSTIC_CHARS).collect();
        out.push_str("...");
        out
    }
}

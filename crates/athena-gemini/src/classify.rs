//! Classification of Gemini's informal error protocol.
//!
//! The API signals rate limiting and model availability through status codes
//! and free-form error text. All of that brittle text matching lives in this
//! one function so the rest of the crate works against a closed enum.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

/// `retry in 3s` / `Please retry in 7.5s` hints embedded in quota errors.
static RETRY_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)retry in (\d+\.?\d*)s").expect("valid retry-hint regex"));

/// Closed classification of a Gemini error response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Quota or rate-limit signal, retryable with backoff.
    RateLimited { retry_after: Option<Duration> },
    /// The addressed model is unknown to this credential or API version.
    ModelNotFound,
    /// Anything else; not retried.
    Other,
}

/// Classify a non-success response by status code and error text.
pub fn classify(status: Option<u16>, message: &str) -> ErrorKind {
    let lower = message.to_lowercase();

    if status == Some(429)
        || message.contains("429")
        || lower.contains("quota")
        || lower.contains("rate limit")
    {
        let retry_after = RETRY_HINT
            .captures(message)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .map(Duration::from_secs_f64);
        return ErrorKind::RateLimited { retry_after };
    }

    if lower.contains("model") && (status == Some(404) || lower.contains("not found")) {
        return ErrorKind::ModelNotFound;
    }

    ErrorKind::Other
}

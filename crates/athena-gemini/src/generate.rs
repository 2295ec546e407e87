//! Generation call with rate-limit retry.

use std::time::Duration;

use tracing::{info, warn};

use crate::classify::{classify, ErrorKind};
use crate::client::{GeminiClient, Part};
use crate::error::{truncate_diagnostic, GeminiError, GeminiResult};
use crate::model::DEFAULT_MODEL;

/// Returned verbatim when the service replies with empty content.
pub const EMPTY_RESULT_PLACEHOLDER: &str = "Không có nội dung trả về.";

/// Exhausted-quota message: short diagnosis plus remediation, in the
/// product's display language.
const RATE_LIMIT_MESSAGE: &str = "Đã vượt quá quota của Google Gemini API. \
Vui lòng đợi vài phút rồi thử lại, hoặc nâng cấp API key lên paid plan.";

/// Retry behavior for the generation call only; polling in the submission
/// manager stays fixed-interval.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Initial delay; doubles after each rate-limited attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(5),
        }
    }
}

/// Compute the wait before the next attempt.
///
/// A `retry in <n>s` hint from the error text overrides the scheduled
/// delay, padded by 2s so the retry lands after the quota window reopens.
fn backoff_delay(scheduled: Duration, hint: Option<Duration>) -> Duration {
    match hint {
        Some(h) => h + Duration::from_secs(2),
        None => scheduled,
    }
}

/// Invoke generation with rate-limit retry and one-shot model substitution.
///
/// Rate-limit signals are retried with doubling delay up to
/// `policy.max_attempts` total attempts, then surface as `RateLimited`.
/// A model-not-found rejection of the cached `model` substitutes
/// [`DEFAULT_MODEL`] for this call only; the caller's cached choice is
/// never written back. Every other remote failure is terminal
/// `ServiceUnavailable` with a truncated diagnostic.
pub async fn generate_with_retry(
    client: &GeminiClient,
    model: &str,
    parts: Vec<Part>,
    policy: &RetryPolicy,
) -> GeminiResult<String> {
    let mut delay = policy.base_delay;
    let mut model = model.to_string();
    let mut substituted = false;
    let mut attempt = 1u32;

    loop {
        match client.generate(&model, parts.clone()).await {
            Ok(Some(text)) => return Ok(text),
            Ok(None) => return Ok(EMPTY_RESULT_PLACEHOLDER.to_string()),
            Err(GeminiError::Api { status, message }) => {
                match classify(Some(status), &message) {
                    ErrorKind::RateLimited { retry_after } => {
                        if attempt >= policy.max_attempts {
                            warn!(attempts = attempt, "Rate limit retries exhausted");
                            return Err(GeminiError::RateLimited(format!(
                                "{} Chi tiết: {}",
                                RATE_LIMIT_MESSAGE,
                                truncate_diagnostic(&message)
                            )));
                        }
                        let wait = backoff_delay(delay, retry_after);
                        info!(
                            attempt,
                            wait_secs = wait.as_secs(),
                            "Rate limited, backing off"
                        );
                        tokio::time::sleep(wait).await;
                        delay = wait * 2;
                        attempt += 1;
                    }
                    ErrorKind::ModelNotFound if !substituted && model != DEFAULT_MODEL => {
                        // Per-call substitution; the shared cached choice is
                        // untouched, so one stale rejection cannot race
                        // concurrent requests. Retried immediately without
                        // spending a rate-limit attempt.
                        warn!(
                            rejected = %model,
                            substitute = DEFAULT_MODEL,
                            "Cached model rejected, substituting for this request"
                        );
                        model = DEFAULT_MODEL.to_string();
                        substituted = true;
                    }
                    _ => {
                        return Err(GeminiError::unavailable(format!(
                            "{}: {}",
                            status,
                            truncate_diagnostic(&message)
                        )));
                    }
                }
            }
            Err(e) => {
                return Err(GeminiError::unavailable(truncate_diagnostic(
                    &e.to_string(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_uses_scheduled_delay_without_hint() {
        assert_eq!(
            backoff_delay(Duration::from_secs(5), None),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_backoff_hint_overrides_with_two_second_floor() {
        // "retry in 3s" must produce a wait of at least 5s.
        assert_eq!(
            backoff_delay(Duration::from_secs(5), Some(Duration::from_secs(3))),
            Duration::from_secs(5)
        );
        assert_eq!(
            backoff_delay(Duration::from_secs(5), Some(Duration::from_secs(30))),
            Duration::from_secs(32)
        );
    }

    #[test]
    fn test_delay_doubles_monotonically() {
        let mut delay = Duration::from_secs(5);
        let mut previous = Duration::ZERO;
        for _ in 0..3 {
            let wait = backoff_delay(delay, None);
            assert!(wait >= previous);
            previous = wait;
            delay = wait * 2;
        }
        assert_eq!(previous, Duration::from_secs(20));
    }
}
